use reqwest::header::HeaderMap;
use reqwest::StatusCode;

use crate::error::FitbitError;

/// The result of a resource call.
///
/// Returned for every status code; a 4xx or 5xx from the service is data
/// for the caller, not an error.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body. Non-JSON bodies are kept as a JSON string and an
    /// empty body is `null`.
    pub body: serde_json::Value,
}

impl ApiResponse {
    pub(crate) fn from_parts(status: StatusCode, headers: HeaderMap, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(text)
                .unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
        };
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Deserialize the body as a typed value.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, FitbitError> {
        serde_json::from_value(self.body.clone()).map_err(|e| {
            FitbitError::ProtocolError(format!("Failed to deserialize response: {e}"))
        })
    }

    /// Split into `(body, status, headers)`.
    pub fn into_parts(self) -> (serde_json::Value, StatusCode, HeaderMap) {
        (self.body, self.status, self.headers)
    }
}
