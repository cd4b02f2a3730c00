use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::FitbitError;

/// Tokens issued by the token endpoint. The crate never stores these; the
/// caller owns persistence and hands them back for refresh and revocation.
#[derive(Serialize, Deserialize, Clone, PartialEq)]
pub struct TokenSet {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSet")
            .field("access_token", &"<redacted>")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("user_id", &self.user_id)
            .finish()
    }
}

impl TokenSet {
    /// A token pair known only by its values, treated as already expired.
    pub fn from_pair(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: Some(refresh_token.into()),
            expires_in: Some(-1),
            expires_at: Some(chrono::Utc::now() - chrono::Duration::seconds(1)),
            token_type: default_token_type(),
            scope: None,
            user_id: None,
        }
    }

    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => chrono::Utc::now() >= expires,
            None => false,
        }
    }

    /// Granted scopes, split on whitespace.
    pub fn scopes(&self) -> Vec<&str> {
        self.scope
            .as_deref()
            .map(|s| s.split_whitespace().collect())
            .unwrap_or_default()
    }
}

/// Inputs for the authorization-code exchange.
#[derive(Debug, Clone, Default)]
pub struct AccessTokenOptions {
    pub code: Option<String>,
    pub redirect_uri: Option<String>,
    pub code_verifier: Option<String>,
}

impl AccessTokenOptions {
    pub fn new(code: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            redirect_uri: Some(redirect_uri.into()),
            code_verifier: None,
        }
    }

    pub fn with_code_verifier(mut self, verifier: impl Into<String>) -> Self {
        self.code_verifier = Some(verifier.into());
        self
    }
}

/// Raw token response from the OAuth server.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    #[serde(default = "default_token_type")]
    token_type: String,
    scope: Option<String>,
    user_id: Option<String>,
}

impl TokenResponse {
    fn into_token_set(self) -> TokenSet {
        // Lifetimes chrono cannot represent leave the expiry unknown.
        let expires_at = self.expires_in.and_then(|secs| {
            chrono::TimeDelta::try_seconds(secs)
                .and_then(|d| chrono::Utc::now().checked_add_signed(d))
        });
        TokenSet {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_in: self.expires_in,
            expires_at,
            token_type: self.token_type,
            scope: self.scope,
            user_id: self.user_id,
        }
    }
}

pub async fn exchange_code(
    http: &reqwest::Client,
    config: &ClientConfig,
    options: &AccessTokenOptions,
) -> Result<TokenSet, FitbitError> {
    let code = options.code.as_deref().filter(|c| !c.is_empty());
    let redirect_uri = options.redirect_uri.as_deref().filter(|r| !r.is_empty());
    let (code, redirect_uri) = match (code, redirect_uri) {
        (Some(c), Some(r)) => (c, r),
        _ => {
            return Err(FitbitError::InvalidArgument(
                "One of (code, redirect_uri) missing in options".into(),
            ))
        }
    };

    let mut form = vec![
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", redirect_uri),
        ("client_id", config.client_id()),
    ];
    if let Some(verifier) = options.code_verifier.as_deref() {
        form.push(("code_verifier", verifier));
    }

    let token_resp = post_token_form(http, config, &form, "Token exchange").await?;
    Ok(token_resp.into_token_set())
}

/// Refresh an access token. The pair is treated as already expired; if the
/// server does not rotate the refresh token, the supplied one is kept.
pub async fn refresh_token(
    http: &reqwest::Client,
    config: &ClientConfig,
    current: &TokenSet,
) -> Result<TokenSet, FitbitError> {
    let refresh_tok = current.refresh_token.as_deref().unwrap_or_default();
    let form = [
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_tok),
    ];

    let token_resp = post_token_form(http, config, &form, "Token refresh").await?;
    let mut token = token_resp.into_token_set();
    if token.refresh_token.is_none() {
        token.refresh_token = current.refresh_token.clone();
    }
    Ok(token)
}

async fn post_token_form(
    http: &reqwest::Client,
    config: &ClientConfig,
    form: &[(&str, &str)],
    action: &str,
) -> Result<TokenResponse, FitbitError> {
    tracing::debug!(url = %config.token_url(), "{action} request");
    let resp = http
        .post(config.token_url().clone())
        .basic_auth(config.client_id(), Some(config.client_secret()))
        .form(form)
        .send()
        .await
        .map_err(|e| {
            FitbitError::TransportError(format!("{action} request failed: {e}").into())
        })?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
        tracing::warn!(%status, "{action} rejected by token endpoint");
        return Err(FitbitError::OAuthError(format!(
            "{action} failed with status {status}: {body}"
        )));
    }

    resp.json().await.map_err(|e| {
        FitbitError::ProtocolError(format!("Failed to parse {action} response: {e}"))
    })
}
