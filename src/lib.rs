//! Async client for the Fitbit Web API.
//!
//! Covers the OAuth2 authorization-code flow (authorization URL, code
//! exchange, refresh, revocation) and bearer-authenticated JSON calls against
//! `https://api.fitbit.com/1/user/{user}/...`. Token storage is the caller's
//! job: every call takes the tokens it needs.
//!
//! ```no_run
//! use fitbit_api_client::{AccessTokenOptions, ApiClient, AuthorizeUrlOptions};
//!
//! # async fn run() -> Result<(), fitbit_api_client::FitbitError> {
//! let client = ApiClient::new("22ABCD", "client-secret")?;
//! let url = client.authorize_url(&AuthorizeUrlOptions::new(
//!     "https://app.example.com/callback",
//!     "activity profile",
//! ))?;
//! println!("visit {url}");
//!
//! let tokens = client
//!     .get_access_token(&AccessTokenOptions::new("code-from-callback", "https://app.example.com/callback"))
//!     .await?;
//! let profile = client.get("/profile.json", &tokens.access_token, None).await?;
//! println!("{} {}", profile.status, profile.body);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod oauth;
pub mod types;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::FitbitError;
pub use oauth::{
    generate_pkce, AccessTokenOptions, AuthorizeUrlOptions, PkceChallenge, Revocation,
    RevokedTokens, TokenSet, TokenTypeHint,
};
pub use types::ApiResponse;
