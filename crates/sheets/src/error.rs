/// Errors from the Sheets read path.
#[derive(Debug, thiserror::Error)]
pub enum SheetsError {
    /// Transport or provider failure, wrapping the provider's message
    /// when one was returned. An expired token lands here too.
    #[error("the API returned an error: {0}")]
    ApiCall(String),
}

impl From<reqwest::Error> for SheetsError {
    fn from(e: reqwest::Error) -> Self {
        Self::ApiCall(e.to_string())
    }
}
