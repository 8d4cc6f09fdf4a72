pub mod authorizer;
pub mod error;
pub mod flow;
pub mod pkce;
pub mod prompt;
pub mod secrets;
pub mod storage;
pub mod types;

pub use {
    authorizer::Authorizer,
    error::AuthError,
    flow::{AuthRequest, OAuthFlow},
    prompt::{CodePrompt, StdinPrompt},
    secrets::read_application_secret,
    storage::TokenStore,
    types::{ApplicationSecret, PkceChallenge, StoredToken, serialize_option_secret, serialize_secret},
};
