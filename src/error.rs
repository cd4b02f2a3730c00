#[derive(Debug, thiserror::Error)]
pub enum FitbitError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid client configuration: {0}")]
    ConfigError(String),

    #[error("Transport error: {0}")]
    TransportError(Box<dyn std::error::Error + Send + Sync>),

    #[error("OAuth error: {0}")]
    OAuthError(String),

    #[error("Protocol error: {0}")]
    ProtocolError(String),
}

impl FitbitError {
    /// Error code string for structured JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            FitbitError::InvalidArgument(_) => "invalid_argument",
            FitbitError::ConfigError(_) => "config_error",
            FitbitError::TransportError(_) => "transport_error",
            FitbitError::OAuthError(_) => "oauth_error",
            FitbitError::ProtocolError(_) => "parse_error",
        }
    }

    /// True for failures raised before any request was sent.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, FitbitError::InvalidArgument(_))
    }

    /// True for transport failures and error responses from the token or
    /// revocation endpoints.
    pub fn is_network_or_protocol(&self) -> bool {
        matches!(
            self,
            FitbitError::TransportError(_)
                | FitbitError::OAuthError(_)
                | FitbitError::ProtocolError(_)
        )
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        })
    }
}

impl From<reqwest::Error> for FitbitError {
    fn from(err: reqwest::Error) -> Self {
        FitbitError::TransportError(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_argument() {
        let err = FitbitError::InvalidArgument("One of (scope, redirect_uri) missing".into());
        assert_eq!(
            err.to_string(),
            "Invalid argument: One of (scope, redirect_uri) missing"
        );
    }

    #[test]
    fn display_transport_error() {
        let err = FitbitError::TransportError("connection refused".into());
        assert_eq!(err.to_string(), "Transport error: connection refused");
    }

    #[test]
    fn display_oauth_error() {
        let err = FitbitError::OAuthError("Token exchange failed with status 401".into());
        assert_eq!(
            err.to_string(),
            "OAuth error: Token exchange failed with status 401"
        );
    }

    #[test]
    fn error_code_mapping_all_variants() {
        assert_eq!(
            FitbitError::InvalidArgument("a".into()).code(),
            "invalid_argument"
        );
        assert_eq!(FitbitError::ConfigError("c".into()).code(), "config_error");
        assert_eq!(
            FitbitError::TransportError("t".into()).code(),
            "transport_error"
        );
        assert_eq!(FitbitError::OAuthError("o".into()).code(), "oauth_error");
        assert_eq!(FitbitError::ProtocolError("p".into()).code(), "parse_error");
    }

    #[test]
    fn classification() {
        assert!(FitbitError::InvalidArgument("a".into()).is_invalid_argument());
        assert!(!FitbitError::InvalidArgument("a".into()).is_network_or_protocol());
        assert!(FitbitError::TransportError("t".into()).is_network_or_protocol());
        assert!(FitbitError::OAuthError("o".into()).is_network_or_protocol());
        assert!(FitbitError::ProtocolError("p".into()).is_network_or_protocol());
        assert!(!FitbitError::ConfigError("c".into()).is_network_or_protocol());
    }

    #[test]
    fn error_to_json_structure() {
        let err = FitbitError::OAuthError("bad grant".into());
        let json = err.to_json();
        let error_obj = json.get("error").expect("should have error key");
        assert_eq!(error_obj["code"], "oauth_error");
        assert!(error_obj["message"].as_str().unwrap().contains("bad grant"));
    }
}
