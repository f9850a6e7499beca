//! Google Photos album CLI library
//!
//! Authenticates against the Photos Library API with the OAuth2
//! authorization-code flow and manages albums: list, get, create and page
//! through them.
//!
//! # Modules
//!
//! - `api` - HTTP endpoint of the local OAuth callback listener
//! - `cli` - Command implementations and output rendering
//! - `config` - Environment configuration and `credentials.json` loading
//! - `error` - Error taxonomy shared by all layers
//! - `management` - Token store, OAuth flow controller and album service
//! - `photos` - HTTP clients for the album endpoints and the OAuth provider
//! - `server` - Lifecycle of the local callback listener
//! - `types` - Data structures exchanged with the API and stored on disk
//! - `utils` - Small helpers
//!
//! # Example
//!
//! ```
//! use photoscli::{cli, config};
//!
//! #[tokio::main]
//! async fn main() -> photoscli::error::Result<()> {
//!     config::load_env().await?;
//!     let service = cli::album_service().await?;
//!     cli::list_albums(&service, &mut std::io::stdout()).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod photos;
pub mod server;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Listening for the OAuth callback on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Authentication successful!");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark to stderr and exits
/// the program with status 1.
///
/// Only `main` uses this: commands return their errors instead of exiting,
/// so a failing command never leaves the process half way through.
///
/// # Example
///
/// ```
/// error!("Failed to list albums: {}", e);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Failed to open browser. Please open the URL above manually.");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
