use reqwest::Url;

use crate::error::FitbitError;

pub const DEFAULT_API_BASE: &str = "https://api.fitbit.com";
pub const DEFAULT_AUTHORIZE_URL: &str = "https://www.fitbit.com/oauth2/authorize";
pub const TOKEN_PATH: &str = "oauth2/token";
pub const REVOKE_PATH: &str = "oauth2/revoke";

/// Immutable client configuration: credentials and service endpoints.
///
/// The authorization endpoint lives on the user-facing `www` host while the
/// token, revocation and resource endpoints live on the API host.
#[derive(Clone)]
pub struct ClientConfig {
    client_id: String,
    client_secret: String,
    api_base: Url,
    authorize_url: Url,
    token_url: Url,
    revoke_url: Url,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("api_base", &self.api_base.as_str())
            .field("authorize_url", &self.authorize_url.as_str())
            .field("token_url", &self.token_url.as_str())
            .field("revoke_url", &self.revoke_url.as_str())
            .finish()
    }
}

impl ClientConfig {
    /// Configuration bound to the public Fitbit endpoints.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, FitbitError> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        if client_id.trim().is_empty() {
            return Err(FitbitError::ConfigError("client_id must not be empty".into()));
        }
        if client_secret.trim().is_empty() {
            return Err(FitbitError::ConfigError(
                "client_secret must not be empty".into(),
            ));
        }

        let api_base = parse_url("api_base", DEFAULT_API_BASE)?;
        let authorize_url = parse_url("authorize_url", DEFAULT_AUTHORIZE_URL)?;
        let token_url = join_base(&api_base, TOKEN_PATH)?;
        let revoke_url = join_base(&api_base, REVOKE_PATH)?;

        Ok(Self {
            client_id,
            client_secret,
            api_base,
            authorize_url,
            token_url,
            revoke_url,
        })
    }

    /// Build a configuration from `FITBIT_*` environment variables.
    ///
    /// `FITBIT_CLIENT_ID` and `FITBIT_CLIENT_SECRET` are required;
    /// `FITBIT_API_BASE` and `FITBIT_AUTHORIZE_URL` override the defaults.
    pub fn from_env() -> Result<Self, FitbitError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`ClientConfig::from_env`] but reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FitbitError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    FitbitError::ConfigError(format!("Environment variable '{name}' is not set"))
                })
        };

        let mut config = Self::new(required("FITBIT_CLIENT_ID")?, required("FITBIT_CLIENT_SECRET")?)?;
        if let Some(base) = lookup("FITBIT_API_BASE").filter(|v| !v.is_empty()) {
            config = config.with_api_base(&base)?;
        }
        if let Some(url) = lookup("FITBIT_AUTHORIZE_URL").filter(|v| !v.is_empty()) {
            config = config.with_authorize_url(&url)?;
        }
        Ok(config)
    }

    /// Point the API host somewhere else. Token and revocation URLs follow
    /// the new base.
    pub fn with_api_base(mut self, base: &str) -> Result<Self, FitbitError> {
        let api_base = parse_url("api_base", base)?;
        self.token_url = join_base(&api_base, TOKEN_PATH)?;
        self.revoke_url = join_base(&api_base, REVOKE_PATH)?;
        self.api_base = api_base;
        Ok(self)
    }

    pub fn with_authorize_url(mut self, url: &str) -> Result<Self, FitbitError> {
        self.authorize_url = parse_url("authorize_url", url)?;
        Ok(self)
    }

    pub fn with_token_url(mut self, url: &str) -> Result<Self, FitbitError> {
        self.token_url = parse_url("token_url", url)?;
        Ok(self)
    }

    pub fn with_revoke_url(mut self, url: &str) -> Result<Self, FitbitError> {
        self.revoke_url = parse_url("revoke_url", url)?;
        Ok(self)
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    pub fn authorize_url(&self) -> &Url {
        &self.authorize_url
    }

    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    pub fn revoke_url(&self) -> &Url {
        &self.revoke_url
    }

    /// Resource URL for `path` on behalf of `user_id`, or the token owner
    /// (`-`) when no user is given.
    pub fn resource_url(&self, path: &str, user_id: Option<&str>) -> String {
        let user = match user_id {
            Some(id) if !id.is_empty() => id,
            _ => "-",
        };
        format!(
            "{}/1/user/{user}{path}",
            self.api_base.as_str().trim_end_matches('/')
        )
    }
}

fn parse_url(field: &str, value: &str) -> Result<Url, FitbitError> {
    let url = Url::parse(value)
        .map_err(|e| FitbitError::ConfigError(format!("Invalid {field} '{value}': {e}")))?;
    match url.scheme() {
        "https" | "http" => Ok(url),
        scheme => Err(FitbitError::ConfigError(format!(
            "Unsupported URL scheme '{scheme}' in {field} '{value}'"
        ))),
    }
}

fn join_base(base: &Url, path: &str) -> Result<Url, FitbitError> {
    let joined = format!("{}/{path}", base.as_str().trim_end_matches('/'));
    parse_url("endpoint", &joined)
}
