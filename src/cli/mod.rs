//! # CLI Module
//!
//! The command layer of photoscli. Each command builds the services it needs
//! from configuration, delegates to the management layer and renders the
//! result for the terminal.
//!
//! ## Commands
//!
//! ### Authentication
//!
//! - [`auth`] - Obtains a token through the local callback listener, a
//!   printed authorization URL, or a pasted authorization code
//! - [`auth_status`] - Reports whether a valid token is stored
//!
//! ### Albums
//!
//! - [`list_albums`] - First page of albums, plus the next one if announced
//! - [`get_album`] - One album by id
//! - [`create_album`] - Creates an album, with a timestamped default title
//! - [`next_page`] - The page for a given page token
//!
//! ## Data Flow
//!
//! ```text
//! CLI Layer (rendering, spinners)
//!     ↓
//! Management Layer (AlbumService, OAuthFlow, FileTokenStore)
//!     ↓
//! Photos Integration Layer (HttpAlbumTransport, GoogleAuthProvider)
//! ```
//!
//! Rendering functions write to any [`std::io::Write`] so the output of a
//! command can be inspected without a terminal. Failures are returned to
//! `main`, which reports them and exits with status 1.

mod albums;
mod auth;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use albums::create_album;
pub use albums::get_album;
pub use albums::list_albums;
pub use albums::next_page;
pub use auth::AuthMode;
pub use auth::auth;
pub use auth::status as auth_status;

use crate::{
    config,
    error::{Error, Result},
    management::{AlbumService, AuthStatus, CallbackSettings, FileTokenStore, OAuthFlow},
    photos::{albums::HttpAlbumTransport, auth::GoogleAuthProvider},
};

pub type GoogleOAuthFlow = OAuthFlow<GoogleAuthProvider, FileTokenStore>;

/// Builds the OAuth flow from `credentials.json` and the configured token file.
pub async fn oauth_flow() -> Result<GoogleOAuthFlow> {
    let credentials = config::load_credentials(&config::credentials_path()).await?;
    let provider = GoogleAuthProvider::new(credentials, config::scopes(), config::http_timeout()?)?;
    let store = FileTokenStore::new(config::token_path());
    Ok(OAuthFlow::new(provider, store, CallbackSettings::from_env()?))
}

/// Builds an album service authorized with the stored token.
pub async fn album_service() -> Result<AlbumService<HttpAlbumTransport>> {
    let flow = oauth_flow().await?;
    match flow.authenticate().await? {
        AuthStatus::Authorized(token) => {
            let transport =
                HttpAlbumTransport::new(config::api_url(), &token, config::http_timeout()?)?;
            Ok(AlbumService::new(transport))
        }
        AuthStatus::AuthorizationRequired(reason) => Err(Error::Unauthorized(reason.to_string())),
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    pb.set_style(style);
    pb
}
