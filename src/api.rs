//! HTTP seam for the auth and feature-flag backends.
//!
//! [`AuthApi`] is the trait boundary the store and feature loaders depend
//! on; [`HttpAuthApi`] is the reqwest-backed production implementation.
//! Tests drive the store through scripted fakes of this trait.
//!
//! No request carries a timeout or abort signal; a hung call resolves when
//! the runtime's own connection handling gives up.

use serde::de::DeserializeOwned;

use crate::config::AuthConfig;
use crate::types::{
    FeatureFlag, LoginRequest, LoginResponse, ProfileResponse, ProfileUpdate, RegisterRequest,
    RegisterResponse, UserAccess,
};

/// Transport-level outcome classes for an endpoint call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The endpoint rejected the credential (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,
    /// Non-success status with the server's `message`, if it sent one.
    #[error("server error {code}: {message}")]
    Status { code: u16, message: String },
    /// Connection/transport failure.
    #[error("network error: {0}")]
    Network(String),
    /// The body could not be decoded as the expected JSON shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// The auth/feature backend surface consumed by this crate.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// `GET` the profile for the given bearer token.
    async fn fetch_profile(&self, token: &str) -> Result<ProfileResponse, ApiError>;
    /// `POST` login credentials. Business failures map to [`ApiError::Status`]
    /// so the caller can classify the server's message text.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;
    /// `POST` a normalized registration payload.
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError>;
    /// `PUT` a partial profile update; returns the full updated profile.
    async fn update_profile(
        &self,
        token: &str,
        patch: &ProfileUpdate,
    ) -> Result<ProfileResponse, ApiError>;
    /// `GET` the feature-flag catalog. Best-effort.
    async fn fetch_feature_catalog(&self) -> Result<Vec<FeatureFlag>, ApiError>;
    /// `GET` the per-user entitlement record. Best-effort.
    async fn fetch_user_access(&self, user_id: &str) -> Result<UserAccess, ApiError>;
}

/// reqwest-backed [`AuthApi`].
pub struct HttpAuthApi {
    client: reqwest::Client,
    config: AuthConfig,
}

impl HttpAuthApi {
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        Self { client: reqwest::Client::new(), config }
    }

    /// Build with a preconfigured client (proxies, TLS overrides).
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: AuthConfig) -> Self {
        Self { client, config }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Extract the server's `message` field from a failure body, falling
    /// back to the raw text.
    async fn failure(response: reqwest::Response) -> ApiError {
        let code = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or(body);
        ApiError::Status { code, message }
    }
}

#[async_trait::async_trait]
impl AuthApi for HttpAuthApi {
    async fn fetch_profile(&self, token: &str) -> Result<ProfileResponse, ApiError> {
        let response = self
            .client
            .get(self.config.endpoint(&self.config.profile_path))
            .bearer_auth(token)
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        Self::decode(response).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response = self
            .client
            .post(self.config.endpoint(&self.config.login_path))
            .json(request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        Self::decode(response).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        let response = self
            .client
            .post(self.config.endpoint(&self.config.register_path))
            .json(request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        Self::decode(response).await
    }

    async fn update_profile(
        &self,
        token: &str,
        patch: &ProfileUpdate,
    ) -> Result<ProfileResponse, ApiError> {
        let response = self
            .client
            .put(self.config.endpoint(&self.config.profile_path))
            .bearer_auth(token)
            .json(patch)
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        Self::decode(response).await
    }

    async fn fetch_feature_catalog(&self) -> Result<Vec<FeatureFlag>, ApiError> {
        let response = self
            .client
            .get(self.config.endpoint(&self.config.features_path))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        Self::decode(response).await
    }

    async fn fetch_user_access(&self, user_id: &str) -> Result<UserAccess, ApiError> {
        let path = format!("{}/{user_id}", self.config.user_access_path);
        let response = self.client.get(self.config.endpoint(&path)).send().await?;
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        Self::decode(response).await
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
