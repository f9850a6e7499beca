//! # Photos Integration Module
//!
//! HTTP integration with the photo library API and its OAuth provider. This is
//! the lowest networked layer of photoscli: everything here maps one call to
//! one HTTP request and decodes the answer into the types of [`crate::types`].
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer
//!     ↓
//! Management Layer (AlbumService, OAuthFlow, TokenStore)
//!     ↓
//! Photos Integration Layer
//!     ├── albums  (AlbumTransport: list, get, create, fetch_page)
//!     └── auth    (AuthProvider: authorization URL, code exchange)
//!     ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! Both submodules expose a capability trait next to their HTTP
//! implementation so the management layer can be exercised against in-memory
//! doubles.
//!
//! ## Endpoints
//!
//! - `GET /albums` - first page of albums
//! - `GET /albums?pageToken=...` - a following page
//! - `GET /albums/{id}` - one album
//! - `POST /albums` - create an album from `{"album": {"title": ...}}`
//! - `POST {token_uri}` - authorization-code exchange
//!
//! ## Error Handling
//!
//! Calls are attempted once. A failed connection surfaces as
//! [`crate::error::Error::Transport`], a non-2xx answer as
//! [`crate::error::Error::Api`] carrying the status and body, and an
//! unexpected body as [`crate::error::Error::Decode`]. Code exchange failures
//! of any kind become [`crate::error::Error::Exchange`].

pub mod albums;
pub mod auth;
