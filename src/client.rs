use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Method;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::FitbitError;
use crate::oauth::authorize::{build_authorize_url, AuthorizeUrlOptions};
use crate::oauth::revoke::{revoke_token, token_for, Revocation, RevokedTokens, TokenTypeHint};
use crate::oauth::token::{exchange_code, refresh_token, AccessTokenOptions, TokenSet};
use crate::types::ApiResponse;

/// Fitbit Web API client.
///
/// Holds only configuration and a connection pool; tokens are passed in on
/// every call. Cloning is cheap and clones share the pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the public Fitbit endpoints.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, FitbitError> {
        Ok(Self::with_config(ClientConfig::new(client_id, client_secret)?))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Use a caller-built HTTP client (timeouts, proxies, TLS settings).
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the user-facing authorization URL. Fails immediately with
    /// [`FitbitError::InvalidArgument`] if `redirect_uri` or `scope` is missing.
    pub fn authorize_url(&self, options: &AuthorizeUrlOptions) -> Result<String, FitbitError> {
        build_authorize_url(&self.config, options)
    }

    /// Exchange an authorization code for tokens.
    pub async fn get_access_token(
        &self,
        options: &AccessTokenOptions,
    ) -> Result<TokenSet, FitbitError> {
        exchange_code(&self.http, &self.config, options).await
    }

    /// Refresh using an access/refresh pair, treating the access token as expired.
    pub async fn refresh_access_token(
        &self,
        access_token: &str,
        refresh_tok: &str,
    ) -> Result<TokenSet, FitbitError> {
        let current = TokenSet::from_pair(access_token, refresh_tok);
        refresh_token(&self.http, &self.config, &current).await
    }

    pub async fn revoke_access_token(&self, tokens: &TokenSet) -> Result<Revocation, FitbitError> {
        revoke_token(&self.http, &self.config, tokens, TokenTypeHint::AccessToken).await
    }

    pub async fn revoke_refresh_token(
        &self,
        tokens: &TokenSet,
    ) -> Result<Revocation, FitbitError> {
        revoke_token(&self.http, &self.config, tokens, TokenTypeHint::RefreshToken).await
    }

    /// Revoke the access token, then the refresh token. Both must be present
    /// before anything is sent. Stops at the first failure; the refresh token
    /// is only revoked once the access token is.
    pub async fn revoke_tokens(&self, tokens: &TokenSet) -> Result<RevokedTokens, FitbitError> {
        token_for(tokens, TokenTypeHint::AccessToken)?;
        token_for(tokens, TokenTypeHint::RefreshToken)?;
        let access = self.revoke_access_token(tokens).await?;
        let refresh = self.revoke_refresh_token(tokens).await?;
        Ok(RevokedTokens { access, refresh })
    }

    pub async fn get(
        &self,
        path: &str,
        access_token: &str,
        user_id: Option<&str>,
    ) -> Result<ApiResponse, FitbitError> {
        self.request::<()>(Method::GET, path, access_token, None, user_id)
            .await
    }

    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        access_token: &str,
        data: &T,
        user_id: Option<&str>,
    ) -> Result<ApiResponse, FitbitError> {
        self.request(Method::POST, path, access_token, Some(data), user_id)
            .await
    }

    pub async fn put<T: Serialize + ?Sized>(
        &self,
        path: &str,
        access_token: &str,
        data: &T,
        user_id: Option<&str>,
    ) -> Result<ApiResponse, FitbitError> {
        self.request(Method::PUT, path, access_token, Some(data), user_id)
            .await
    }

    pub async fn delete(
        &self,
        path: &str,
        access_token: &str,
        user_id: Option<&str>,
    ) -> Result<ApiResponse, FitbitError> {
        self.request::<()>(Method::DELETE, path, access_token, None, user_id)
            .await
    }

    async fn request<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        access_token: &str,
        data: Option<&T>,
        user_id: Option<&str>,
    ) -> Result<ApiResponse, FitbitError> {
        let url = self.config.resource_url(path, user_id);
        tracing::debug!(%method, %url, "Fitbit API request");

        let mut req = self
            .http
            .request(method, &url)
            .bearer_auth(access_token)
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(data) = data {
            // Serialize up front so a bad payload is reported as the caller's fault.
            let body = serde_json::to_value(data).map_err(|e| {
                FitbitError::InvalidArgument(format!("Request body is not valid JSON: {e}"))
            })?;
            req = req.json(&body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let text = resp.text().await?;

        tracing::debug!(%status, %url, "Fitbit API response");
        Ok(ApiResponse::from_parts(status, headers, &text))
    }
}
