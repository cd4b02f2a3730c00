use crate::config::ClientConfig;
use crate::error::FitbitError;
use crate::oauth::pkce::CODE_CHALLENGE_METHOD;

/// Parameters for the user-facing authorization redirect.
///
/// `redirect_uri` and `scope` are required. Fitbit scopes are
/// space-separated (e.g. `"activity profile sleep"`).
#[derive(Debug, Clone, Default)]
pub struct AuthorizeUrlOptions {
    pub redirect_uri: Option<String>,
    pub scope: Option<String>,
    pub state: Option<String>,
    pub code_challenge: Option<String>,
    /// Extra query parameters passed through as-is (`prompt`, `expires_in`, ...).
    pub extra: Vec<(String, String)>,
}

impl AuthorizeUrlOptions {
    pub fn new(redirect_uri: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            redirect_uri: Some(redirect_uri.into()),
            scope: Some(scope.into()),
            ..Self::default()
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_code_challenge(mut self, challenge: impl Into<String>) -> Self {
        self.code_challenge = Some(challenge.into());
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }
}

/// Build the authorization URL on the configured user-facing host.
///
/// Fails with [`FitbitError::InvalidArgument`] before building anything when
/// `redirect_uri` or `scope` is missing.
pub fn build_authorize_url(
    config: &ClientConfig,
    options: &AuthorizeUrlOptions,
) -> Result<String, FitbitError> {
    let (redirect_uri, scope) = match (present(&options.redirect_uri), present(&options.scope)) {
        (Some(r), Some(s)) => (r, s),
        _ => {
            return Err(FitbitError::InvalidArgument(
                "One of (scope, redirect_uri) missing in options".into(),
            ))
        }
    };

    let mut url = config.authorize_url().clone();
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("response_type", "code")
            .append_pair("client_id", config.client_id())
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("scope", scope);
        if let Some(state) = present(&options.state) {
            query.append_pair("state", state);
        }
        for (key, value) in &options.extra {
            query.append_pair(key, value);
        }
        if let Some(challenge) = present(&options.code_challenge) {
            query
                .append_pair("code_challenge", challenge)
                .append_pair("code_challenge_method", CODE_CHALLENGE_METHOD);
        }
    }

    Ok(url.to_string())
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;

    fn config() -> ClientConfig {
        ClientConfig::new("22ABCD", "secret").unwrap()
    }

    fn query(url: &str) -> Vec<(String, String)> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn url_is_on_www_host() {
        let url = build_authorize_url(
            &config(),
            &AuthorizeUrlOptions::new("https://app.example.com/callback", "activity profile"),
        )
        .unwrap();
        let parsed = Url::parse(&url).unwrap();
        assert_eq!(parsed.host_str(), Some("www.fitbit.com"));
        assert_eq!(parsed.path(), "/oauth2/authorize");
    }

    #[test]
    fn url_carries_required_params_in_order() {
        let url = build_authorize_url(
            &config(),
            &AuthorizeUrlOptions::new("https://app.example.com/callback", "activity profile")
                .with_state("xyz"),
        )
        .unwrap();
        assert_eq!(
            query(&url),
            vec![
                ("response_type".into(), "code".into()),
                ("client_id".into(), "22ABCD".into()),
                ("redirect_uri".into(), "https://app.example.com/callback".into()),
                ("scope".into(), "activity profile".into()),
                ("state".into(), "xyz".into()),
            ]
        );
    }

    #[test]
    fn passthrough_and_pkce_params() {
        let url = build_authorize_url(
            &config(),
            &AuthorizeUrlOptions::new("https://app.example.com/cb", "sleep")
                .with_param("prompt", "consent")
                .with_code_challenge("abc"),
        )
        .unwrap();
        let pairs = query(&url);
        assert!(pairs.contains(&("prompt".into(), "consent".into())));
        assert!(pairs.contains(&("code_challenge".into(), "abc".into())));
        assert!(pairs.contains(&("code_challenge_method".into(), "S256".into())));
    }

    #[test]
    fn missing_redirect_uri_is_invalid_argument() {
        let options = AuthorizeUrlOptions {
            scope: Some("activity".into()),
            ..AuthorizeUrlOptions::default()
        };
        let err = build_authorize_url(&config(), &options).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn missing_scope_is_invalid_argument() {
        let options = AuthorizeUrlOptions {
            redirect_uri: Some("https://app.example.com/cb".into()),
            ..AuthorizeUrlOptions::default()
        };
        let err = build_authorize_url(&config(), &options).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn empty_scope_is_invalid_argument() {
        let err = build_authorize_url(
            &config(),
            &AuthorizeUrlOptions::new("https://app.example.com/cb", ""),
        )
        .unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
