//! File-backed storage for the single OAuth token.
//!
//! Writes go to a temporary sibling file which is then renamed over the
//! target, so a concurrent reader sees either the old or the new token and
//! never a truncated file.

use std::{
    future::Future,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    error::{Error, Result},
    types::Token,
};

/// Storage capability for the process-wide token.
pub trait TokenStore: Send + Sync {
    /// Fails with [`Error::NotFound`] when no token was saved yet and
    /// [`Error::Decode`] when the stored record is malformed.
    fn load(&self) -> impl Future<Output = Result<Token>> + Send;

    /// Replaces the stored token.
    fn save(&self, token: &Token) -> impl Future<Output = Result<()>> + Send;
}

pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileTokenStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "token.json".into());
        self.path
            .with_file_name(format!(".{name}.tmp.{}", std::process::id()))
    }
}

impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Token> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound(format!(
                    "no token file at {}",
                    self.path.display()
                )));
            }
            Err(e) => {
                return Err(Error::Persist(format!(
                    "reading {}: {e}",
                    self.path.display()
                )));
            }
        };

        let token: Token = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), "loaded token");
        Ok(token)
    }

    async fn save(&self, token: &Token) -> Result<()> {
        let json = serde_json::to_string_pretty(token)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::Persist(format!("creating {}: {e}", parent.display())))?;
        }

        let tmp_path = self.temp_path();
        async_fs::write(&tmp_path, json.as_bytes())
            .await
            .map_err(|e| Error::Persist(format!("writing {}: {e}", tmp_path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            async_fs::set_permissions(&tmp_path, perms)
                .await
                .map_err(|e| Error::Persist(format!("setting token file permissions: {e}")))?;
        }

        if let Err(e) = async_fs::rename(&tmp_path, &self.path).await {
            let _ = async_fs::remove_file(&tmp_path).await;
            return Err(Error::Persist(format!(
                "renaming into {}: {e}",
                self.path.display()
            )));
        }

        debug!(path = %self.path.display(), "persisted token");
        Ok(())
    }
}
