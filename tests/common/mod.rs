use fitbit_api_client::{ApiClient, ClientConfig};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
/// `Basic base64("client-id:client-secret")`
#[allow(dead_code)]
pub const BASIC_AUTH: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";

/// Build a client whose API host is the mock server.
pub fn client_for(server: &MockServer) -> ApiClient {
    let config = ClientConfig::new(CLIENT_ID, CLIENT_SECRET)
        .unwrap()
        .with_api_base(&server.uri())
        .unwrap();
    ApiClient::with_config(config)
}

/// A token endpoint payload shaped like Fitbit's.
#[allow(dead_code)]
pub fn token_payload(access: &str, refresh: &str) -> serde_json::Value {
    serde_json::json!({
        "access_token": access,
        "expires_in": 28800,
        "refresh_token": refresh,
        "scope": "activity profile",
        "token_type": "Bearer",
        "user_id": "26FWFL"
    })
}

/// Mount a revocation mock for one token type hint.
#[allow(dead_code)]
pub async fn mount_revoke(server: &MockServer, hint: &str, status: u16, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/oauth2/revoke"))
        .and(header("Authorization", BASIC_AUTH))
        .and(body_string_contains(format!("token_type_hint={hint}")))
        .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({})))
        .expect(expected_calls)
        .mount(server)
        .await;
}
