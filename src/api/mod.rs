//! # API Module
//!
//! HTTP endpoints served by the temporary local listener during the OAuth
//! authorization-code flow.
//!
//! ## Endpoints
//!
//! - [`callback`] - `GET /oauth2callback`. Receives the browser redirect from
//!   the authorization server, validates `error`, `state` and `code`, and hands
//!   the outcome to the waiting flow controller through [`CallbackState`].
//!
//! The listener exposes nothing else; any other path answers `404`.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use photoscli::api::{callback, CallbackState};
//!
//! let app = Router::new()
//!     .route("/oauth2callback", get(callback))
//!     .with_state(state);
//! ```

mod callback;

pub use callback::CallbackState;
pub use callback::callback;
pub use callback::validate;
