use std::io::Write;

use chrono::Utc;
use tabled::Table;

use crate::{
    cli::spinner,
    error::Result,
    management::AlbumService,
    photos::albums::AlbumTransport,
    types::{Album, AlbumPage, AlbumTableRow},
    utils,
};

pub async fn list_albums<T: AlbumTransport>(
    service: &AlbumService<T>,
    out: &mut impl Write,
) -> Result<()> {
    let pb = spinner("Fetching albums...");
    let listing = service.list_albums_with_next_page().await;
    pb.finish_and_clear();
    let listing = listing?;

    writeln!(out, "Albums:")?;
    render_page(&listing.first, out)?;

    if let Some((token, next)) = listing.next {
        writeln!(out, "Next page token: {token}")?;
        let page = next?;
        if !page.albums.is_empty() {
            writeln!(out, "Found {} albums on next page:", page.albums.len())?;
            render_page(&page, out)?;
        }
        if let Some(more) = page.next_page() {
            writeln!(out, "More albums available: photoscli albums next {more}")?;
        }
    }

    Ok(())
}

pub async fn get_album<T: AlbumTransport>(
    service: &AlbumService<T>,
    id: &str,
    out: &mut impl Write,
) -> Result<()> {
    let album = service.get_album(id).await?;
    render_album(&album, out)
}

pub async fn create_album<T: AlbumTransport>(
    service: &AlbumService<T>,
    title: Option<String>,
    out: &mut impl Write,
) -> Result<()> {
    let title = title.unwrap_or_else(|| utils::default_album_title(Utc::now()));
    let album = service.create_album(&title).await?;
    writeln!(
        out,
        "Created album: {} with ID: {}",
        album.title, album.id
    )?;
    Ok(())
}

pub async fn next_page<T: AlbumTransport>(
    service: &AlbumService<T>,
    page_token: &str,
    out: &mut impl Write,
) -> Result<()> {
    let pb = spinner("Fetching next page...");
    let page = service.fetch_next_page(page_token).await;
    pb.finish_and_clear();
    let page = page?;

    render_page(&page, out)?;
    if let Some(more) = page.next_page() {
        writeln!(out, "Next page token: {more}")?;
    }
    Ok(())
}

fn render_page(page: &AlbumPage, out: &mut impl Write) -> Result<()> {
    if page.albums.is_empty() {
        writeln!(out, "No albums found.")?;
        return Ok(());
    }

    let rows: Vec<AlbumTableRow> = page.albums.iter().map(AlbumTableRow::from).collect();
    writeln!(out, "{}", Table::new(rows))?;
    Ok(())
}

fn render_album(album: &Album, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Album Info:")?;
    writeln!(out, "- ID: {}", album.id)?;
    writeln!(out, "- Title: {}", album.title)?;
    if let Some(count) = &album.media_items_count {
        writeln!(out, "- Items: {count}")?;
    }
    if let Some(url) = &album.product_url {
        writeln!(out, "- URL: {url}")?;
    }
    Ok(())
}
