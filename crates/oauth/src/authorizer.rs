//! The authorization state machine.
//!
//! `Unauthenticated → TokenCached → Authorized` when the cache holds a
//! parseable token, otherwise `Unauthenticated → AwaitingUserCode →
//! Authorized` via the interactive grant.

use {
    anyhow::Result,
    tracing::{debug, info},
};

use crate::{flow::OAuthFlow, prompt::CodePrompt, storage::TokenStore, types::StoredToken};

#[derive(Debug)]
pub struct Authorizer {
    flow: OAuthFlow,
    store: TokenStore,
}

impl Authorizer {
    pub fn new(flow: OAuthFlow, store: TokenStore) -> Self {
        Self { flow, store }
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Produce a usable token, consulting the cache first.
    ///
    /// A cached token is used as-is, with no expiry check: if it has
    /// expired that surfaces as an API-call failure, not here. Any cache
    /// miss falls through to the interactive grant.
    pub async fn authorize(&self, prompt: &dyn CodePrompt) -> Result<StoredToken> {
        match self.store.load() {
            Ok(token) => {
                debug!("using cached token");
                Ok(token)
            },
            Err(e) => {
                debug!(reason = %e, "no usable cached token, starting interactive grant");
                self.interactive_grant(prompt).await
            },
        }
    }

    /// Run the interactive grant unconditionally, overwriting any cached
    /// token on success.
    pub async fn interactive_grant(&self, prompt: &dyn CodePrompt) -> Result<StoredToken> {
        let req = self.flow.start()?;
        let code = prompt.ask(&req.url)?;
        let token = self.flow.exchange(&code, &req.pkce.verifier).await?;
        self.store.save(&token)?;
        info!(path = %self.store.path().display(), "token stored");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use secrecy::{ExposeSecret, Secret};

    use {
        super::*,
        crate::{error::AuthError, types::ApplicationSecret},
    };

    /// Prompt that returns a canned code and records whether it fired.
    struct CannedPrompt {
        code: String,
        asked: std::sync::atomic::AtomicBool,
    }

    impl CannedPrompt {
        fn new(code: &str) -> Self {
            Self {
                code: code.into(),
                asked: std::sync::atomic::AtomicBool::new(false),
            }
        }

        fn was_asked(&self) -> bool {
            self.asked.load(std::sync::atomic::Ordering::SeqCst)
        }
    }

    impl CodePrompt for CannedPrompt {
        fn ask(&self, _auth_url: &str) -> Result<String, AuthError> {
            self.asked.store(true, std::sync::atomic::Ordering::SeqCst);
            Ok(self.code.clone())
        }
    }

    fn test_secret(token_uri: &str) -> ApplicationSecret {
        ApplicationSecret {
            client_id: "client-1".into(),
            client_secret: Secret::new("secret-1".into()),
            auth_uri: "https://accounts.google.com/o/oauth2/auth".into(),
            token_uri: token_uri.into(),
            redirect_uris: vec!["https://google.com".into()],
        }
    }

    fn scopes() -> Vec<String> {
        vec!["https://www.googleapis.com/auth/spreadsheets.readonly".into()]
    }

    #[tokio::test]
    async fn cached_token_skips_the_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::with_path(dir.path().join("token.json"));
        store
            .save(&StoredToken {
                access_token: Secret::new("cached-at".into()),
                refresh_token: None,
                expires_at: Some(1), // long expired — must still be used as-is
                token_type: "Bearer".into(),
                scope: None,
            })
            .unwrap();

        let authorizer = Authorizer::new(
            OAuthFlow::new(test_secret("https://x.invalid"), scopes(), None),
            store,
        );
        let prompt = CannedPrompt::new("unused");
        let token = authorizer.authorize(&prompt).await.unwrap();

        assert_eq!(token.access_token.expose_secret(), "cached-at");
        assert!(!prompt.was_asked());
    }

    #[tokio::test]
    async fn cache_miss_runs_grant_and_persists_token() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "fresh-at", "expires_in": 3600}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::with_path(dir.path().join("token.json"));
        let authorizer = Authorizer::new(
            OAuthFlow::new(
                test_secret(&format!("{}/token", server.url())),
                scopes(),
                None,
            ),
            store.clone(),
        );

        let prompt = CannedPrompt::new("grant-code");
        let token = authorizer.authorize(&prompt).await.unwrap();

        assert!(prompt.was_asked());
        assert_eq!(token.access_token.expose_secret(), "fresh-at");
        // Persisted for the next run.
        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.access_token.expose_secret(), "fresh-at");
    }

    #[tokio::test]
    async fn failed_exchange_persists_nothing() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "invalid_grant"}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::with_path(dir.path().join("token.json"));
        let authorizer = Authorizer::new(
            OAuthFlow::new(
                test_secret(&format!("{}/token", server.url())),
                scopes(),
                None,
            ),
            store.clone(),
        );

        let prompt = CannedPrompt::new("bad-code");
        let err = authorizer.authorize(&prompt).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AuthError>(),
            Some(AuthError::Exchange(_))
        ));
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn interactive_grant_overwrites_cached_token() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "new-at"}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::with_path(dir.path().join("token.json"));
        store
            .save(&StoredToken {
                access_token: Secret::new("old-at".into()),
                refresh_token: None,
                expires_at: None,
                token_type: "Bearer".into(),
                scope: None,
            })
            .unwrap();

        let authorizer = Authorizer::new(
            OAuthFlow::new(
                test_secret(&format!("{}/token", server.url())),
                scopes(),
                None,
            ),
            store.clone(),
        );

        let prompt = CannedPrompt::new("grant-code");
        authorizer.interactive_grant(&prompt).await.unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.access_token.expose_secret(), "new-at");
    }
}
