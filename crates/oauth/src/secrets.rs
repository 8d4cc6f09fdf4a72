//! Loading the OAuth client descriptor from a Cloud Console export.

use std::path::Path;

use {serde::Deserialize, tracing::debug};

use crate::{error::AuthError, types::ApplicationSecret};

/// Top-level shape of `credentials.json`: the descriptor nests under
/// `installed` (desktop apps) or `web` (web apps).
#[derive(Debug, Deserialize)]
struct ConsoleApplicationSecret {
    #[serde(default)]
    installed: Option<ApplicationSecret>,
    #[serde(default)]
    web: Option<ApplicationSecret>,
}

/// Read the client id/secret descriptor from `path`.
///
/// A missing or malformed file is a fatal startup condition, there is
/// nothing to fall back to.
pub fn read_application_secret(path: &Path) -> Result<ApplicationSecret, AuthError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AuthError::Config(format!("{}: {e}", path.display())))?;

    let parsed: ConsoleApplicationSecret = serde_json::from_str(&raw)
        .map_err(|e| AuthError::Config(format!("{}: {e}", path.display())))?;

    let secret = parsed.installed.or(parsed.web).ok_or_else(|| {
        AuthError::Config(format!(
            "{}: expected an `installed` or `web` section",
            path.display()
        ))
    })?;

    debug!(client_id = %secret.client_id, "loaded client secret");
    Ok(secret)
}
