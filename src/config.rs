//! Configuration management for photoscli.
//!
//! Values come from environment variables, optionally loaded from a `.env`
//! file in the platform-specific local data directory. Every value has a
//! default so a bare `credentials.json` in the working directory is enough to
//! get started.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use crate::{
    error::{Error, Result},
    types::{ClientCredentials, CredentialsFile},
};

pub const DEFAULT_API_URL: &str = "https://photoslibrary.googleapis.com/v1";
pub const DEFAULT_CALLBACK_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 600;

pub const DEFAULT_SCOPES: [&str; 3] = [
    "https://www.googleapis.com/auth/photoslibrary.readonly.appcreateddata",
    "https://www.googleapis.com/auth/photoslibrary.appendonly",
    "https://www.googleapis.com/auth/photoslibrary.edit.appcreateddata",
];

/// Loads environment variables from `photoscli/.env` in the local data
/// directory.
///
/// Creates the directory if it doesn't exist. A missing `.env` file is
/// reported as an error so the caller can decide whether to warn about it.
///
/// The file is looked up in:
/// - Linux: `~/.local/share/photoscli/.env`
/// - macOS: `~/Library/Application Support/photoscli/.env`
/// - Windows: `%LOCALAPPDATA%/photoscli/.env`
pub async fn load_env() -> Result<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::Config(format!("creating {}: {e}", parent.display())))?;
    }

    dotenv::from_path(&path)
        .map_err(|e| Error::Config(format!("loading {}: {e}", path.display())))?;
    Ok(())
}

pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("photoscli/.env");
    path
}

pub fn credentials_path() -> PathBuf {
    env::var("PHOTOSCLI_CREDENTIALS_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("credentials.json"))
}

pub fn token_path() -> PathBuf {
    env::var("PHOTOSCLI_TOKEN_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("token.json"))
}

pub fn api_url() -> String {
    env::var("PHOTOSCLI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

pub fn callback_addr() -> Result<SocketAddr> {
    let raw = env::var("PHOTOSCLI_CALLBACK_ADDRESS")
        .unwrap_or_else(|_| DEFAULT_CALLBACK_ADDRESS.to_string());
    SocketAddr::from_str(&raw)
        .map_err(|e| Error::Config(format!("invalid callback address {raw:?}: {e}")))
}

pub fn scopes() -> Vec<String> {
    match env::var("PHOTOSCLI_SCOPES") {
        Ok(raw) if !raw.trim().is_empty() => raw.split_whitespace().map(String::from).collect(),
        _ => DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn http_timeout() -> Result<Duration> {
    seconds_var("PHOTOSCLI_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)
}

/// How long the local-server flow waits for the browser callback.
pub fn auth_timeout() -> Result<Duration> {
    seconds_var("PHOTOSCLI_AUTH_TIMEOUT_SECS", DEFAULT_AUTH_TIMEOUT_SECS)
}

fn seconds_var(name: &str, default: u64) -> Result<Duration> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| Error::Config(format!("{name} must be a number of seconds: {e}"))),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}

/// Reads the OAuth client configuration from a provider `credentials.json`.
pub async fn load_credentials(path: &std::path::Path) -> Result<ClientCredentials> {
    let content = async_fs::read_to_string(path)
        .await
        .map_err(|e| Error::Credentials(format!("unable to read {}: {e}", path.display())))?;
    parse_credentials(&content)
}

pub fn parse_credentials(content: &str) -> Result<ClientCredentials> {
    let file: CredentialsFile = serde_json::from_str(content)
        .map_err(|e| Error::Credentials(format!("unable to parse credentials: {e}")))?;

    let credentials = file
        .installed
        .or(file.web)
        .ok_or_else(|| Error::Credentials("missing \"installed\" or \"web\" section".into()))?;

    if credentials.redirect_uris.is_empty() {
        return Err(Error::Credentials("no redirect URI configured".into()));
    }
    Ok(credentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSTALLED: &str = r#"{
        "installed": {
            "client_id": "id.apps.googleusercontent.com",
            "client_secret": "secret",
            "auth_uri": "https://accounts.google.com/o/oauth2/auth",
            "token_uri": "https://oauth2.googleapis.com/token",
            "redirect_uris": ["http://localhost:8080/oauth2callback"]
        }
    }"#;

    #[test]
    fn parses_installed_credentials() {
        let creds = parse_credentials(INSTALLED).unwrap();
        assert_eq!(creds.client_id, "id.apps.googleusercontent.com");
        assert_eq!(creds.redirect_uris[0], "http://localhost:8080/oauth2callback");
    }

    #[test]
    fn parses_web_credentials() {
        let web = INSTALLED.replace("installed", "web");
        let creds = parse_credentials(&web).unwrap();
        assert_eq!(creds.client_secret, "secret");
    }

    #[test]
    fn rejects_credentials_without_client_section() {
        let err = parse_credentials(r#"{"other": {}}"#).unwrap_err();
        assert!(matches!(err, Error::Credentials(_)));
    }

    #[test]
    fn rejects_credentials_without_redirect_uri() {
        let raw = INSTALLED.replace(r#""http://localhost:8080/oauth2callback""#, "");
        let err = parse_credentials(&raw).unwrap_err();
        assert!(matches!(err, Error::Credentials(_)));
    }
}
