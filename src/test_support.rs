//! Shared test doubles: a scripted backend, storage, and notifier harness.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::api::{ApiError, AuthApi};
use crate::config::AuthConfig;
use crate::notify::{Level, RecordingNotifier};
use crate::storage::MemoryCredentialStore;
use crate::store::SessionStore;
use crate::types::{
    FeatureFlag, LoginRequest, LoginResponse, ProfileResponse, ProfileUpdate, RegisterRequest,
    RegisterResponse, UserAccess,
};

/// Scripted backend: each call pops the next queued outcome for its
/// endpoint; unscripted calls fail as network errors.
#[derive(Default)]
pub struct ScriptedApi {
    pub profile: Mutex<VecDeque<Result<ProfileResponse, ApiError>>>,
    pub login: Mutex<VecDeque<Result<LoginResponse, ApiError>>>,
    pub register: Mutex<VecDeque<Result<RegisterResponse, ApiError>>>,
    pub update: Mutex<VecDeque<Result<ProfileResponse, ApiError>>>,
    pub catalog: Mutex<VecDeque<Result<Vec<FeatureFlag>, ApiError>>>,
    pub access: Mutex<VecDeque<Result<UserAccess, ApiError>>>,
    profile_calls: AtomicUsize,
}

impl ScriptedApi {
    pub fn with_profile(outcome: Result<ProfileResponse, ApiError>) -> Self {
        let api = Self::default();
        api.profile.lock().unwrap().push_back(outcome);
        api
    }

    pub fn with_login(outcome: Result<LoginResponse, ApiError>) -> Self {
        let api = Self::default();
        api.login.lock().unwrap().push_back(outcome);
        api
    }

    pub fn with_register(outcome: Result<RegisterResponse, ApiError>) -> Self {
        let api = Self::default();
        api.register.lock().unwrap().push_back(outcome);
        api
    }

    pub fn with_update(outcome: Result<ProfileResponse, ApiError>) -> Self {
        let api = Self::default();
        api.update.lock().unwrap().push_back(outcome);
        api
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl AuthApi for ScriptedApi {
    async fn fetch_profile(&self, _token: &str) -> Result<ProfileResponse, ApiError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.profile
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ApiError::Network("unscripted profile call".into())))
    }

    async fn login(&self, _request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.login
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ApiError::Network("unscripted login call".into())))
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.register
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ApiError::Network("unscripted register call".into())))
    }

    async fn update_profile(
        &self,
        _token: &str,
        _patch: &ProfileUpdate,
    ) -> Result<ProfileResponse, ApiError> {
        self.update
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ApiError::Network("unscripted update call".into())))
    }

    async fn fetch_feature_catalog(&self) -> Result<Vec<FeatureFlag>, ApiError> {
        self.catalog
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ApiError::Network("unscripted catalog call".into())))
    }

    async fn fetch_user_access(&self, _user_id: &str) -> Result<UserAccess, ApiError> {
        self.access
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ApiError::Network("unscripted access call".into())))
    }
}

/// A store wired to scripted doubles, with handles to each.
pub struct Harness {
    pub store: Arc<SessionStore>,
    pub api: Arc<ScriptedApi>,
    pub storage: Arc<MemoryCredentialStore>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn harness(api: ScriptedApi) -> Harness {
    let api = Arc::new(api);
    let storage = Arc::new(MemoryCredentialStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let store = Arc::new(SessionStore::new(
        api.clone(),
        storage.clone(),
        notifier.clone(),
        AuthConfig::new("http://localhost:8080"),
    ));
    Harness { store, api, storage, notifier }
}

/// A well-formed profile body for `user-123`.
pub fn valid_profile() -> ProfileResponse {
    serde_json::from_value(serde_json::json!({
        "id": "user-123",
        "email": "t@example.com",
        "firstName": "T",
        "lastName": "U",
        "role": "USER",
        "isActive": true
    }))
    .unwrap()
}

pub fn user_login_response() -> LoginResponse {
    serde_json::from_value(serde_json::json!({
        "accessToken": "user-token-12345",
        "userId": "user-123",
        "username": "tuser",
        "email": "t@example.com",
        "role": "USER",
        "active": true
    }))
    .unwrap()
}

pub fn admin_login_response() -> LoginResponse {
    serde_json::from_value(serde_json::json!({
        "accessToken": "admin-token",
        "userId": "admin-123",
        "username": "admin",
        "email": "admin@smartwatts.ng",
        "role": "ADMIN",
        "active": true
    }))
    .unwrap()
}

/// Error-level notice messages, in order.
pub fn error_messages(notifier: &RecordingNotifier) -> Vec<String> {
    notifier
        .notices()
        .into_iter()
        .filter(|n| n.level == Level::Error)
        .map(|n| n.message)
        .collect()
}
