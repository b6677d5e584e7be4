use super::*;

use crate::role::Role;
use crate::types::RegisterData;

fn api_for(server: &mockito::ServerGuard) -> HttpAuthApi {
    HttpAuthApi::new(AuthConfig::new(server.url()))
}

// =============================================================================
// fetch_profile
// =============================================================================

#[tokio::test]
async fn fetch_profile_sends_bearer_and_parses_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/users/profile")
        .match_header("authorization", "Bearer valid-token-12345")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id":"user-123","email":"t@example.com","firstName":"T","lastName":"U","role":"ROLE_USER","isActive":true}"#,
        )
        .create_async()
        .await;

    let api = api_for(&server);
    let profile = api.fetch_profile("valid-token-12345").await.unwrap();
    mock.assert_async().await;
    assert_eq!(profile.id.as_deref(), Some("user-123"));
    assert_eq!(profile.email.as_deref(), Some("t@example.com"));
    assert_eq!(profile.role, Some(Role::User));
}

#[tokio::test]
async fn fetch_profile_401_maps_to_unauthorized() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/users/profile")
        .with_status(401)
        .with_body(r#"{"message":"Authentication required"}"#)
        .create_async()
        .await;

    let api = api_for(&server);
    let error = api.fetch_profile("expired-token-123").await.unwrap_err();
    assert_eq!(error, ApiError::Unauthorized);
}

#[tokio::test]
async fn fetch_profile_500_carries_server_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/users/profile")
        .with_status(500)
        .with_body(r#"{"message":"upstream down"}"#)
        .create_async()
        .await;

    let api = api_for(&server);
    let error = api.fetch_profile("valid-token-12345").await.unwrap_err();
    assert_eq!(error, ApiError::Status { code: 500, message: "upstream down".into() });
}

#[tokio::test]
async fn fetch_profile_garbage_body_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/users/profile")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let api = api_for(&server);
    let error = api.fetch_profile("valid-token-12345").await.unwrap_err();
    assert!(matches!(error, ApiError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    // Nothing listens on this port.
    let api = HttpAuthApi::new(AuthConfig::new("http://127.0.0.1:9"));
    let error = api.fetch_profile("valid-token-12345").await.unwrap_err();
    assert!(matches!(error, ApiError::Network(_)));
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn login_posts_camel_case_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/users/login")
        .match_body(mockito::Matcher::Json(serde_json::json!({
            "usernameOrEmail": "t@example.com",
            "password": "password123"
        })))
        .with_status(200)
        .with_body(
            r#"{"accessToken":"user-token-12345","userId":"user-123","username":"tuser","email":"t@example.com","role":"USER","active":true}"#,
        )
        .create_async()
        .await;

    let api = api_for(&server);
    let request = LoginRequest {
        username_or_email: "t@example.com".into(),
        password: "password123".into(),
    };
    let response = api.login(&request).await.unwrap();
    mock.assert_async().await;
    assert_eq!(response.access_token, "user-token-12345");
    assert_eq!(response.role, Role::User);
}

#[tokio::test]
async fn login_failure_extracts_message_field() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/users/login")
        .with_status(401)
        .with_body(r#"{"message":"Invalid credentials"}"#)
        .create_async()
        .await;

    let api = api_for(&server);
    let request = LoginRequest { username_or_email: "x".into(), password: "y".into() };
    let error = api.login(&request).await.unwrap_err();
    // Login business failures keep their status + message for classification.
    assert_eq!(error, ApiError::Status { code: 401, message: "Invalid credentials".into() });
}

#[tokio::test]
async fn login_failure_without_json_body_falls_back_to_text() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/users/login")
        .with_status(503)
        .with_body("Service Unavailable")
        .create_async()
        .await;

    let api = api_for(&server);
    let request = LoginRequest { username_or_email: "x".into(), password: "y".into() };
    let error = api.login(&request).await.unwrap_err();
    assert_eq!(error, ApiError::Status { code: 503, message: "Service Unavailable".into() });
}

// =============================================================================
// register
// =============================================================================

#[tokio::test]
async fn register_posts_normalized_payload() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/users/register")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "username": "newuser",
            "phoneNumber": "+2348012345678"
        })))
        .with_status(200)
        .with_body(r#"{"message":"Registration successful"}"#)
        .create_async()
        .await;

    let api = api_for(&server);
    let request = RegisterRequest::from_data(RegisterData {
        email: "new.user@example.com".into(),
        password: "password123".into(),
        phone_number: "08012345678".into(),
        ..Default::default()
    });
    let response = api.register(&request).await.unwrap();
    mock.assert_async().await;
    assert!(response.access_token.is_none());
}

// =============================================================================
// update_profile
// =============================================================================

#[tokio::test]
async fn update_profile_puts_partial_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/users/profile")
        .match_header("authorization", "Bearer valid-token-12345")
        .match_body(mockito::Matcher::Json(serde_json::json!({ "firstName": "Ada" })))
        .with_status(200)
        .with_body(
            r#"{"id":"user-123","email":"t@example.com","firstName":"Ada","lastName":"U","role":"ROLE_USER","isActive":true}"#,
        )
        .create_async()
        .await;

    let api = api_for(&server);
    let patch = ProfileUpdate { first_name: Some("Ada".into()), ..Default::default() };
    let profile = api.update_profile("valid-token-12345", &patch).await.unwrap();
    mock.assert_async().await;
    assert_eq!(profile.first_name.as_deref(), Some("Ada"));
}

// =============================================================================
// feature endpoints
// =============================================================================

#[tokio::test]
async fn fetch_feature_catalog_parses_list() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/features")
        .with_status(200)
        .with_body(
            r#"[{"id":"f1","featureKey":"BASIC_MONITORING","featureName":"Basic monitoring","isGloballyEnabled":true,"isPaidFeature":false}]"#,
        )
        .create_async()
        .await;

    let api = api_for(&server);
    let flags = api.fetch_feature_catalog().await.unwrap();
    assert_eq!(flags.len(), 1);
    assert_eq!(flags[0].feature_key, "BASIC_MONITORING");
}

#[tokio::test]
async fn fetch_user_access_appends_user_id() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/user-access/user-123")
        .with_status(200)
        .with_body(r#"{"userId":"user-123","currentPlan":"FREEMIUM"}"#)
        .create_async()
        .await;

    let api = api_for(&server);
    let access = api.fetch_user_access("user-123").await.unwrap();
    mock.assert_async().await;
    assert_eq!(access.current_plan, "FREEMIUM");
}
