/// Config schema types for the sheet target and the OAuth flow.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Google's read-only Sheets scope, the only scope this tool requests.
pub const READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetdumpConfig {
    pub sheet: SheetConfig,
    pub auth: AuthConfig,
}

/// Which spreadsheet and cell range to read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Spreadsheet ID from the document URL.
    pub spreadsheet_id: Option<String>,

    /// A1-notation range expression.
    pub range: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            range: "Sheet1!A1:B2".to_string(),
        }
    }
}

/// OAuth client-secret location, token cache location and requested scopes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Path to the `credentials.json` downloaded from the Cloud Console.
    pub credentials_path: PathBuf,

    /// Path of the token cache. Defaults to `token.json` in the config dir.
    pub token_path: Option<PathBuf>,

    /// Scopes requested during the consent flow.
    pub scopes: Vec<String>,

    /// Override the redirect URI from the client secret, if set.
    pub redirect_uri: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from("credentials.json"),
            token_path: None,
            scopes: vec![READONLY_SCOPE.to_string()],
            redirect_uri: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_request_only_the_readonly_scope() {
        let cfg = SheetdumpConfig::default();
        assert_eq!(cfg.auth.scopes, vec![READONLY_SCOPE.to_string()]);
    }

    #[test]
    fn empty_config_parses_with_defaults() {
        let cfg: SheetdumpConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.sheet.range, "Sheet1!A1:B2");
        assert_eq!(cfg.auth.credentials_path, PathBuf::from("credentials.json"));
        assert!(cfg.sheet.spreadsheet_id.is_none());
    }

    #[test]
    fn partial_toml_overrides_one_section() {
        let cfg: SheetdumpConfig = toml::from_str(
            r#"
            [sheet]
            spreadsheet_id = "1GZxvoZ9ItrQ4BLlxY-e4JfImNIxz2yyiVzzKEQX-g7I"
            range = "Data!A1:C10"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.sheet.range, "Data!A1:C10");
        assert_eq!(cfg.auth.scopes, vec![READONLY_SCOPE.to_string()]);
    }
}
