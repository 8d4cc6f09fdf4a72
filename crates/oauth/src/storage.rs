use std::path::{Path, PathBuf};

use {anyhow::Result, tracing::debug};

use crate::{error::AuthError, types::StoredToken};

/// File-based token cache, by default at `~/.config/sheetdump/token.json`.
///
/// Holds at most one token; every successful grant overwrites the file
/// wholesale. Concurrent processes are not coordinated.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new() -> Self {
        let path = sheetdump_config::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("token.json");
        Self { path }
    }

    /// Create a token store at a specific path (useful for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the cached token.
    ///
    /// Missing and corrupt files both come back as [`AuthError::TokenRead`];
    /// the authorizer treats either as a cache miss, never as fatal.
    pub fn load(&self) -> Result<StoredToken, AuthError> {
        let data = std::fs::read_to_string(&self.path)
            .map_err(|e| AuthError::TokenRead(format!("{}: {e}", self.path.display())))?;
        serde_json::from_str(&data)
            .map_err(|e| AuthError::TokenRead(format!("{}: {e}", self.path.display())))
    }

    /// Serialize and write the token, overwriting any existing content.
    pub fn save(&self, token: &StoredToken) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_string_pretty(token)?;
        std::fs::write(&self.path, &data)?;

        // Set file permissions to 0600 on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        debug!(path = %self.path.display(), "token stored");
        Ok(())
    }

    /// Remove the cached token. A missing file is not an error.
    pub fn delete(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}
