//! Authorized client for the Sheets v4 `values.get` endpoint.

use {
    secrecy::{ExposeSecret, Secret},
    serde::Deserialize,
    sheetdump_oauth::StoredToken,
    tracing::debug,
    url::Url,
};

use crate::error::SheetsError;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

/// Capability handle bound to an access token. Reconstructed each run,
/// never persisted.
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
    access_token: Secret<String>,
}

impl SheetsClient {
    pub fn new(token: &StoredToken) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: SHEETS_API_BASE.to_string(),
            access_token: token.access_token.clone(),
        }
    }

    /// Point the client at a different API host (used in tests).
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Read one A1-notation range in a single request.
    ///
    /// The whole range comes back in one response; there is no pagination.
    /// An empty range is a valid outcome and yields an empty vector.
    pub async fn get_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = self.values_url(spreadsheet_id, range)?;
        debug!(%spreadsheet_id, %range, "reading range");

        let response = self
            .http
            .get(url)
            .bearer_auth(self.access_token.expose_secret())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<ApiErrorEnvelope>()
                .await
                .map(|e| e.error.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(SheetsError::ApiCall(detail));
        }

        let body: ValueRange = response.json().await?;
        Ok(body.values)
    }

    fn values_url(&self, spreadsheet_id: &str, range: &str) -> Result<Url, SheetsError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SheetsError::ApiCall(format!("invalid API base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| SheetsError::ApiCall("invalid API base URL".into()))?
            .extend(["v4", "spreadsheets", spreadsheet_id, "values", range]);
        Ok(url)
    }
}

/// Response shape of `values.get`. The `values` key is absent entirely
/// when the range holds no data.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}
