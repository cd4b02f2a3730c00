use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::FitbitError;
use crate::oauth::token::TokenSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenTypeHint {
    AccessToken,
    RefreshToken,
}

impl TokenTypeHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenTypeHint::AccessToken => "access_token",
            TokenTypeHint::RefreshToken => "refresh_token",
        }
    }
}

impl std::fmt::Display for TokenTypeHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single successful revocation request.
#[derive(Debug, Clone, Serialize)]
pub struct Revocation {
    pub token_type_hint: TokenTypeHint,
    pub status: u16,
    pub body: serde_json::Value,
}

/// Both revocations performed by a combined revoke, access token first.
#[derive(Debug, Clone, Serialize)]
pub struct RevokedTokens {
    pub access: Revocation,
    pub refresh: Revocation,
}

/// The token `hint` selects from `tokens`; missing or empty is an
/// [`FitbitError::InvalidArgument`].
pub fn token_for(tokens: &TokenSet, hint: TokenTypeHint) -> Result<&str, FitbitError> {
    match hint {
        TokenTypeHint::AccessToken => Some(tokens.access_token.as_str()),
        TokenTypeHint::RefreshToken => tokens.refresh_token.as_deref(),
    }
    .filter(|t| !t.is_empty())
    .ok_or_else(|| FitbitError::InvalidArgument(format!("Token set has no {hint} to revoke")))
}

/// Revoke one token of `tokens`, selected by `hint`.
pub async fn revoke_token(
    http: &reqwest::Client,
    config: &ClientConfig,
    tokens: &TokenSet,
    hint: TokenTypeHint,
) -> Result<Revocation, FitbitError> {
    let token = token_for(tokens, hint)?;

    tracing::debug!(url = %config.revoke_url(), %hint, "Token revocation request");
    let resp = http
        .post(config.revoke_url().clone())
        .basic_auth(config.client_id(), Some(config.client_secret()))
        .form(&[("token", token), ("token_type_hint", hint.as_str())])
        .send()
        .await
        .map_err(|e| {
            FitbitError::TransportError(format!("Revocation of {hint} failed: {e}").into())
        })?;

    let status = resp.status();
    let text = resp.text().await.map_err(|e| {
        FitbitError::TransportError(format!("Reading revocation response failed: {e}").into())
    })?;

    if !status.is_success() {
        tracing::warn!(%status, %hint, "Token revocation rejected");
        return Err(FitbitError::OAuthError(format!(
            "Revocation of {hint} failed with status {status}: {text}"
        )));
    }

    let body = if text.trim().is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(&text).map_err(|e| {
            FitbitError::ProtocolError(format!("Failed to parse revocation response: {e}"))
        })?
    };

    Ok(Revocation {
        token_type_hint: hint,
        status: status.as_u16(),
        body,
    })
}
