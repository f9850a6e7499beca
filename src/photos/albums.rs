use std::{future::Future, time::Duration};

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::{Error, Result},
    types::{Album, AlbumPage, CreateAlbumRequest, Token},
    utils,
};

/// Access to the album collection of the photo library.
pub trait AlbumTransport: Send + Sync {
    fn list(&self) -> impl Future<Output = Result<AlbumPage>> + Send;

    fn get(&self, id: &str) -> impl Future<Output = Result<Album>> + Send;

    fn create(&self, title: &str) -> impl Future<Output = Result<Album>> + Send;

    fn fetch_page(&self, page_token: &str) -> impl Future<Output = Result<AlbumPage>> + Send;
}

/// [`AlbumTransport`] over the Photos Library REST API.
pub struct HttpAlbumTransport {
    client: Client,
    base_url: String,
    access_token: String,
}

impl HttpAlbumTransport {
    pub fn new(base_url: impl Into<String>, token: &Token, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, token))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>, token: &Token) -> Self {
        HttpAlbumTransport {
            client,
            base_url: base_url.into(),
            access_token: token.access_token.clone(),
        }
    }

    fn albums_url(&self) -> String {
        utils::join_url(&self.base_url, "albums")
    }

    /// `{base}/albums/{id}` with the id percent-encoded as a single segment.
    fn album_url(&self, id: &str) -> Result<Url> {
        let albums = self.albums_url();
        let mut url = Url::parse(&albums)
            .map_err(|e| Error::Config(format!("invalid API URL {albums}: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("API URL {albums} cannot take a path")))?
            .push(id);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.bearer_auth(&self.access_token).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    debug!(%status, body = %body, "raw API response");

    if !status.is_success() {
        return Err(Error::Api {
            status,
            message: body,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

impl AlbumTransport for HttpAlbumTransport {
    async fn list(&self) -> Result<AlbumPage> {
        self.send(self.client.get(self.albums_url())).await
    }

    async fn get(&self, id: &str) -> Result<Album> {
        let url = self.album_url(id)?;
        self.send(self.client.get(url)).await
    }

    async fn create(&self, title: &str) -> Result<Album> {
        let request = self
            .client
            .post(self.albums_url())
            .json(&CreateAlbumRequest::new(title));
        self.send(request).await
    }

    async fn fetch_page(&self, page_token: &str) -> Result<AlbumPage> {
        let request = self
            .client
            .get(self.albums_url())
            .query(&[("pageToken", page_token)]);
        self.send(request).await
    }
}
