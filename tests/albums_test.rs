use std::sync::Mutex;

use photoscli::{
    cli,
    error::{Error, Result},
    management::AlbumService,
    photos::albums::AlbumTransport,
    types::{Album, AlbumPage},
};
use reqwest::StatusCode;

// Helper function to create a test album
fn album(id: &str, title: &str) -> Album {
    Album {
        id: id.to_string(),
        title: title.to_string(),
        product_url: None,
        media_items_count: None,
        is_writeable: None,
    }
}

fn page(albums: Vec<Album>, next: &str) -> AlbumPage {
    AlbumPage {
        albums,
        next_page_token: Some(next.to_string()),
    }
}

/// In-memory transport that records every call it receives.
struct FakeTransport {
    first: AlbumPage,
    next: AlbumPage,
    fail_with: Option<StatusCode>,
    fail_next_with: Option<StatusCode>,
    calls: Mutex<Vec<String>>,
}

impl FakeTransport {
    fn new(first: AlbumPage) -> Self {
        FakeTransport {
            first,
            next: AlbumPage::default(),
            fail_with: None,
            fail_next_with: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_next(mut self, next: AlbumPage) -> Self {
        self.next = next;
        self
    }

    fn failing(mut self, status: StatusCode) -> Self {
        self.fail_with = Some(status);
        self
    }

    fn failing_next_page(mut self, status: StatusCode) -> Self {
        self.fail_next_with = Some(status);
        self
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with {
            Some(status) => Err(Error::Api {
                status,
                message: "boom".into(),
            }),
            None => Ok(()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl AlbumTransport for FakeTransport {
    async fn list(&self) -> Result<AlbumPage> {
        self.record("list".into())?;
        Ok(self.first.clone())
    }

    async fn get(&self, id: &str) -> Result<Album> {
        self.record(format!("get:{id}"))?;
        self.first
            .albums
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(Error::Api {
                status: StatusCode::NOT_FOUND,
                message: "not found".into(),
            })
    }

    async fn create(&self, title: &str) -> Result<Album> {
        self.record(format!("create:{title}"))?;
        Ok(album("new-id", title))
    }

    async fn fetch_page(&self, page_token: &str) -> Result<AlbumPage> {
        self.record(format!("fetch_page:{page_token}"))?;
        if let Some(status) = self.fail_next_with {
            return Err(Error::Api {
                status,
                message: "next page unavailable".into(),
            });
        }
        Ok(self.next.clone())
    }
}

#[tokio::test]
async fn test_list_command_shows_all_titles_without_next_page_notice() {
    let transport = FakeTransport::new(page(vec![album("1", "A"), album("2", "B")], ""));
    let service = AlbumService::new(transport);

    let mut out = Vec::new();
    cli::list_albums(&service, &mut out).await.unwrap();
    let output = String::from_utf8(out).unwrap();

    assert!(output.lines().any(|l| l.contains("| A ")));
    assert!(output.lines().any(|l| l.contains("| B ")));
    assert!(!output.to_lowercase().contains("next page"));
    assert_eq!(service.transport().calls(), vec!["list"]);
}

#[tokio::test]
async fn test_list_follows_exactly_one_next_page() {
    let transport = FakeTransport::new(page(vec![album("1", "A")], "XYZ"))
        .with_next(page(vec![album("2", "Second page album")], "MORE"));
    let service = AlbumService::new(transport);

    let listing = service.list_albums_with_next_page().await.unwrap();

    assert_eq!(
        service.transport().calls(),
        vec!["list".to_string(), "fetch_page:XYZ".to_string()]
    );
    assert_eq!(listing.album_count(), 2);
    let (token, next) = listing.next.unwrap();
    assert_eq!(token, "XYZ");
    assert_eq!(next.unwrap().next_page(), Some("MORE"));
}

#[tokio::test]
async fn test_list_command_renders_chased_page() {
    let transport = FakeTransport::new(page(vec![album("1", "A")], "XYZ"))
        .with_next(page(vec![album("2", "Second page album")], ""));
    let service = AlbumService::new(transport);

    let mut out = Vec::new();
    cli::list_albums(&service, &mut out).await.unwrap();
    let output = String::from_utf8(out).unwrap();

    assert!(output.contains("Next page token: XYZ"));
    assert!(output.contains("Second page album"));
    assert!(!output.contains("More albums available"));
}

#[tokio::test]
async fn test_list_command_keeps_first_page_when_next_page_fails() {
    let transport = FakeTransport::new(page(vec![album("1", "FirstPageTitle")], "XYZ"))
        .failing_next_page(StatusCode::INTERNAL_SERVER_ERROR);
    let service = AlbumService::new(transport);

    let mut out = Vec::new();
    let result = cli::list_albums(&service, &mut out).await;
    let output = String::from_utf8(out).unwrap();

    assert!(output.contains("FirstPageTitle"));
    assert!(output.contains("Next page token: XYZ"));
    assert_eq!(
        result.unwrap_err().status(),
        Some(StatusCode::INTERNAL_SERVER_ERROR)
    );
    assert_eq!(
        service.transport().calls(),
        vec!["list".to_string(), "fetch_page:XYZ".to_string()]
    );
}

#[tokio::test]
async fn test_failed_next_page_is_kept_in_listing() {
    let transport = FakeTransport::new(page(vec![album("1", "A"), album("2", "B")], "XYZ"))
        .failing_next_page(StatusCode::BAD_GATEWAY);
    let service = AlbumService::new(transport);

    let listing = service.list_albums_with_next_page().await.unwrap();

    assert_eq!(listing.album_count(), 2);
    let (token, next) = listing.next.unwrap();
    assert_eq!(token, "XYZ");
    assert_eq!(next.unwrap_err().status(), Some(StatusCode::BAD_GATEWAY));
}

#[tokio::test]
async fn test_list_command_reports_empty_library() {
    let service = AlbumService::new(FakeTransport::new(AlbumPage::default()));

    let mut out = Vec::new();
    cli::list_albums(&service, &mut out).await.unwrap();

    assert!(String::from_utf8(out).unwrap().contains("No albums found."));
}

#[tokio::test]
async fn test_list_error_propagates_unchanged() {
    let transport = FakeTransport::new(AlbumPage::default()).failing(StatusCode::UNAUTHORIZED);
    let service = AlbumService::new(transport);

    let err = service.list_albums_with_next_page().await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    // no follow-up after a failed first page
    assert_eq!(service.transport().calls(), vec!["list"]);
}

#[tokio::test]
async fn test_get_album_renders_details() {
    let service = AlbumService::new(FakeTransport::new(page(
        vec![Album {
            product_url: Some("https://photos.example.com/lr/album/1".into()),
            media_items_count: Some("12".into()),
            ..album("1", "Holidays")
        }],
        "",
    )));

    let mut out = Vec::new();
    cli::get_album(&service, "1", &mut out).await.unwrap();
    let output = String::from_utf8(out).unwrap();

    assert!(output.contains("- ID: 1"));
    assert!(output.contains("- Title: Holidays"));
    assert!(output.contains("- Items: 12"));
    assert!(output.contains("https://photos.example.com/lr/album/1"));
}

#[tokio::test]
async fn test_get_unknown_album_is_api_404() {
    let service = AlbumService::new(FakeTransport::new(AlbumPage::default()));

    let err = service.get_album("missing").await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_create_album_uses_given_title() {
    let service = AlbumService::new(FakeTransport::new(AlbumPage::default()));

    let mut out = Vec::new();
    cli::create_album(&service, Some("Trip".into()), &mut out)
        .await
        .unwrap();

    assert_eq!(service.transport().calls(), vec!["create:Trip"]);
    assert!(
        String::from_utf8(out)
            .unwrap()
            .contains("Created album: Trip with ID: new-id")
    );
}

#[tokio::test]
async fn test_create_album_defaults_to_timestamped_title() {
    let service = AlbumService::new(FakeTransport::new(AlbumPage::default()));

    let mut out = Vec::new();
    cli::create_album(&service, None, &mut out).await.unwrap();

    let calls = service.transport().calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].starts_with("create:test-album-"));
}

#[tokio::test]
async fn test_next_page_command_prints_following_token() {
    let transport =
        FakeTransport::new(AlbumPage::default()).with_next(page(vec![album("9", "Z")], "NEXT2"));
    let service = AlbumService::new(transport);

    let mut out = Vec::new();
    cli::next_page(&service, "TOKEN1", &mut out).await.unwrap();
    let output = String::from_utf8(out).unwrap();

    assert_eq!(service.transport().calls(), vec!["fetch_page:TOKEN1"]);
    assert!(output.lines().any(|l| l.contains("| Z ")));
    assert!(output.contains("Next page token: NEXT2"));
}
