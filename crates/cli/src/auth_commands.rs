use {
    anyhow::Result,
    clap::Subcommand,
    sheetdump_config::AuthConfig,
    sheetdump_oauth::{Authorizer, OAuthFlow, StdinPrompt, TokenStore, read_application_secret},
};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Run the interactive grant, replacing any cached token.
    Login,
    /// Show whether a token is cached and how long it remains valid.
    Status,
    /// Delete the cached token.
    Logout,
}

pub async fn handle_auth(action: AuthAction) -> Result<()> {
    let config = sheetdump_config::discover_and_load();
    match action {
        AuthAction::Login => login(&config.auth).await,
        AuthAction::Status => status(&config.auth),
        AuthAction::Logout => logout(&config.auth),
    }
}

/// Build the authorizer from config: client secret, scopes, token path.
pub fn authorizer_from(auth: &AuthConfig) -> Result<Authorizer> {
    let secret = read_application_secret(&auth.credentials_path)?;
    let flow = OAuthFlow::new(secret, auth.scopes.clone(), auth.redirect_uri.clone());
    Ok(Authorizer::new(flow, token_store_from(auth)))
}

fn token_store_from(auth: &AuthConfig) -> TokenStore {
    match &auth.token_path {
        Some(path) => TokenStore::with_path(path.clone()),
        None => TokenStore::new(),
    }
}

async fn login(auth: &AuthConfig) -> Result<()> {
    let authorizer = authorizer_from(auth)?;
    authorizer.interactive_grant(&StdinPrompt::new()).await?;
    println!("Successfully logged in.");
    Ok(())
}

fn status(auth: &AuthConfig) -> Result<()> {
    let store = token_store_from(auth);
    match store.load() {
        Ok(token) => {
            let expiry = token.expires_at.map_or("unknown expiry".to_string(), |ts| {
                let now = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_secs();
                if ts > now {
                    let remaining = ts - now;
                    let hours = remaining / 3600;
                    let mins = (remaining % 3600) / 60;
                    format!("valid ({hours}h {mins}m remaining)")
                } else {
                    // Display only: an expired token is still used as-is and
                    // fails at call time.
                    "expired".to_string()
                }
            });
            println!("Token cached at {} [{expiry}]", store.path().display());
        },
        Err(_) => println!("No cached token. Run `sheetdump auth login`."),
    }
    Ok(())
}

fn logout(auth: &AuthConfig) -> Result<()> {
    let store = token_store_from(auth);
    store.delete()?;
    println!("Token cache cleared.");
    Ok(())
}
