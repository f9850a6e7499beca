use chrono::{TimeZone, Utc};
use photoscli::{
    error::Error,
    management::{FileTokenStore, TokenStore},
    types::Token,
};
use tempfile::TempDir;

fn token(access: &str) -> Token {
    Token {
        access_token: access.to_string(),
        token_type: "Bearer".into(),
        expiry: Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap(),
        refresh_token: Some("1//refresh".into()),
    }
}

#[tokio::test]
async fn test_load_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(dir.path().join("token.json"));

    assert!(matches!(store.load().await, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_load_malformed_file_is_decode_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("token.json");
    std::fs::write(&path, r#"{"access_token": 42}"#).unwrap();

    let store = FileTokenStore::new(path);

    assert!(matches!(store.load().await, Err(Error::Decode(_))));
}

#[tokio::test]
async fn test_save_then_load_returns_same_token() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(dir.path().join("token.json"));

    store.save(&token("first")).await.unwrap();

    assert_eq!(store.load().await.unwrap(), token("first"));
}

#[tokio::test]
async fn test_save_overwrites_previous_token_without_leftovers() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(dir.path().join("token.json"));

    store.save(&token("first")).await.unwrap();
    store.save(&token("second")).await.unwrap();

    assert_eq!(store.load().await.unwrap().access_token, "second");
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1, "temporary file left behind");
}

#[tokio::test]
async fn test_save_creates_missing_directories() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(dir.path().join("nested/cache/token.json"));

    store.save(&token("nested")).await.unwrap();

    assert!(store.path().is_file());
}

#[tokio::test]
async fn test_saved_file_uses_rfc3339_expiry() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(dir.path().join("token.json"));

    store.save(&token("at")).await.unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(raw["expiry"], "2030-01-02T03:04:05Z");
    assert_eq!(raw["token_type"], "Bearer");
}

#[tokio::test]
async fn test_load_accepts_token_without_refresh_token() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("token.json");
    std::fs::write(
        &path,
        r#"{"access_token": "at", "token_type": "Bearer", "expiry": "2030-01-02T03:04:05Z"}"#,
    )
    .unwrap();

    let loaded = FileTokenStore::new(path).load().await.unwrap();

    assert_eq!(loaded.refresh_token, None);
}

#[cfg(unix)]
#[tokio::test]
async fn test_saved_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(dir.path().join("token.json"));
    store.save(&token("at")).await.unwrap();

    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[tokio::test]
async fn test_save_into_unwritable_location_is_persist_error() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file").unwrap();
    let store = FileTokenStore::new(blocker.join("token.json"));

    assert!(matches!(
        store.save(&token("at")).await,
        Err(Error::Persist(_))
    ));
}
