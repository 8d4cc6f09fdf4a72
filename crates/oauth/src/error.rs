/// Errors surfaced by the authorization pipeline.
///
/// Only `TokenRead` is ever recovered from: the [`crate::Authorizer`] treats
/// it as a cache miss and falls back to the interactive grant. Everything
/// else terminates the run.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Client secret file missing or malformed. Fatal at startup.
    #[error("error loading client secret file: {0}")]
    Config(String),

    /// Token cache missing or unreadable.
    #[error("token cache unavailable: {0}")]
    TokenRead(String),

    /// The provider rejected the grant-code exchange.
    #[error("error retrieving access token: {0}")]
    Exchange(String),

    /// Reading the grant code from the user failed.
    #[error("failed to read authorization code: {0}")]
    Prompt(String),
}
