//! Authorization-code flow: consent URL construction and code exchange.

use {
    secrecy::ExposeSecret,
    serde::Deserialize,
    tracing::debug,
    url::Url,
};

use crate::{
    error::AuthError,
    pkce::generate_pkce,
    types::{ApplicationSecret, PkceChallenge, StoredToken, TokenResponse},
};

/// Redirect target when the client secret carries none. The user copies the
/// grant code out of the redirected URL by hand.
const FALLBACK_REDIRECT_URI: &str = "https://google.com";

/// A started flow: the consent URL to show the user plus the PKCE pair
/// needed to finish the exchange.
#[derive(Debug, Clone)]
pub struct AuthRequest {
    pub url: String,
    pub pkce: PkceChallenge,
}

/// One three-legged authorization-code flow against the provider.
#[derive(Debug)]
pub struct OAuthFlow {
    secret: ApplicationSecret,
    scopes: Vec<String>,
    redirect_uri: String,
    http: reqwest::Client,
}

impl OAuthFlow {
    /// `redirect_uri` overrides the secret's first registered redirect URI.
    pub fn new(
        secret: ApplicationSecret,
        scopes: Vec<String>,
        redirect_uri: Option<String>,
    ) -> Self {
        let redirect_uri = redirect_uri
            .or_else(|| secret.redirect_uris.first().cloned())
            .unwrap_or_else(|| FALLBACK_REDIRECT_URI.to_string());
        Self {
            secret,
            scopes,
            redirect_uri,
            http: reqwest::Client::new(),
        }
    }

    /// Build the consent URL the user must visit.
    ///
    /// `access_type=offline` asks the provider for a refresh token alongside
    /// the access token.
    pub fn start(&self) -> Result<AuthRequest, AuthError> {
        let pkce = generate_pkce();
        let mut url = Url::parse(&self.secret.auth_uri)
            .map_err(|e| AuthError::Config(format!("invalid auth URI: {e}")))?;

        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.secret.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", &self.scopes.join(" "))
            .append_pair("access_type", "offline")
            .append_pair("code_challenge", &pkce.challenge)
            .append_pair("code_challenge_method", "S256");

        Ok(AuthRequest {
            url: url.to_string(),
            pkce,
        })
    }

    /// Exchange a grant code for a token. Terminal on failure — the caller
    /// never retries a rejected code.
    pub async fn exchange(&self, code: &str, verifier: &str) -> Result<StoredToken, AuthError> {
        debug!(token_uri = %self.secret.token_uri, "exchanging grant code");

        let response = self
            .http
            .post(&self.secret.token_uri)
            .form(&[
                ("client_id", self.secret.client_id.as_str()),
                ("client_secret", self.secret.client_secret.expose_secret()),
                ("code", code),
                ("code_verifier", verifier),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthError::Exchange(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<TokenErrorResponse>()
                .await
                .map(|e| e.message())
                .unwrap_or_else(|_| status.to_string());
            return Err(AuthError::Exchange(detail));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Exchange(format!("malformed token response: {e}")))?;
        Ok(token.into())
    }
}

/// Error payload of the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

impl TokenErrorResponse {
    fn message(self) -> String {
        match self.error_description {
            Some(desc) => format!("{}: {desc}", self.error),
            None => self.error,
        }
    }
}
