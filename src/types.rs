use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Tokens expiring within this window are treated as already expired.
pub const EXPIRY_DELTA_SECS: i64 = 10;

/// Persisted OAuth credential, stored as `token.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expiry: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl Token {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.access_token.is_empty() && self.expiry - Duration::seconds(EXPIRY_DELTA_SECS) > now
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}

/// Body of a successful response from the provider's token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
}

impl TokenResponse {
    pub fn into_token(self, obtained_at: DateTime<Utc>) -> Token {
        Token {
            access_token: self.access_token,
            token_type: self.token_type,
            expiry: obtained_at + Duration::seconds(self.expires_in.unwrap_or(3600)),
            refresh_token: self.refresh_token.filter(|t| !t.is_empty()),
        }
    }
}

/// OAuth client configuration as found in the `installed` or `web` section
/// of a downloaded `credentials.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsFile {
    pub installed: Option<ClientCredentials>,
    pub web: Option<ClientCredentials>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_items_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_writeable: Option<bool>,
}

/// One page of a cursor-paginated album listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumPage {
    #[serde(default)]
    pub albums: Vec<Album>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl AlbumPage {
    /// Cursor for the following page; an empty token means there is none.
    pub fn next_page(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateAlbumRequest {
    pub album: NewAlbum,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAlbum {
    pub title: String,
}

impl CreateAlbumRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            album: NewAlbum {
                title: title.into(),
            },
        }
    }
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    pub title: String,
    pub id: String,
    pub items: String,
}

impl From<&Album> for AlbumTableRow {
    fn from(album: &Album) -> Self {
        AlbumTableRow {
            title: album.title.clone(),
            id: album.id.clone(),
            items: album.media_items_count.clone().unwrap_or_else(|| "-".into()),
        }
    }
}
