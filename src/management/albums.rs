use tracing::{info, warn};

use crate::{
    error::Result,
    photos::albums::AlbumTransport,
    types::{Album, AlbumPage},
};

/// First page of a listing plus, when the API announced one, the attempt to
/// fetch the page after it.
///
/// A failed follow-up is kept next to its token so the first page can still
/// be shown.
#[derive(Debug)]
pub struct AlbumListing {
    pub first: AlbumPage,
    pub next: Option<(String, Result<AlbumPage>)>,
}

impl AlbumListing {
    pub fn album_count(&self) -> usize {
        let next = match &self.next {
            Some((_, Ok(page))) => page.albums.len(),
            _ => 0,
        };
        self.first.albums.len() + next
    }
}

pub struct AlbumService<T> {
    transport: T,
}

impl<T: AlbumTransport> AlbumService<T> {
    pub fn new(transport: T) -> Self {
        AlbumService { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn list_albums(&self) -> Result<AlbumPage> {
        info!("fetching albums");

        let page = self.transport.list().await.inspect_err(|e| {
            warn!(error = %e, "failed to fetch albums");
        })?;

        info!(count = page.albums.len(), "fetched albums");
        if page.next_page().is_some() {
            info!("more albums available on next page");
        }
        Ok(page)
    }

    pub async fn get_album(&self, id: &str) -> Result<Album> {
        info!(id, "fetching album");

        let album = self.transport.get(id).await.inspect_err(|e| {
            warn!(id, error = %e, "failed to fetch album");
        })?;

        info!(id, title = %album.title, "fetched album");
        Ok(album)
    }

    pub async fn create_album(&self, title: &str) -> Result<Album> {
        info!(title, "creating album");

        let album = self.transport.create(title).await.inspect_err(|e| {
            warn!(title, error = %e, "failed to create album");
        })?;

        info!(id = %album.id, title = %album.title, "created album");
        Ok(album)
    }

    pub async fn fetch_next_page(&self, page_token: &str) -> Result<AlbumPage> {
        info!("fetching next page of albums");

        let page = self.transport.fetch_page(page_token).await.inspect_err(|e| {
            warn!(error = %e, "failed to fetch next page");
        })?;

        info!(count = page.albums.len(), "fetched albums from next page");
        Ok(page)
    }

    /// Lists albums and follows the next-page token once. Later pages are
    /// left to `albums next`.
    ///
    /// Only a failure of the first page fails the call; a failed follow-up is
    /// returned inside the listing.
    pub async fn list_albums_with_next_page(&self) -> Result<AlbumListing> {
        let first = self.list_albums().await?;

        let next = match first.next_page() {
            Some(token) => {
                let token = token.to_string();
                let page = self.fetch_next_page(&token).await;
                Some((token, page))
            }
            None => None,
        };

        Ok(AlbumListing { first, next })
    }
}
