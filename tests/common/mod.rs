#![allow(dead_code)]

use async_trait::async_trait;
use login_portal::application::services::{LoginService, SessionManager};
use login_portal::domain::entities::{SessionProfile, SignInRequest};
use login_portal::infrastructure::auth_api::{AuthApi, AuthApiError};
use login_portal::infrastructure::store::{KeyValueStore, MemoryStore, StoreError, StoreResult};
use login_portal::state::AppState;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const SESSION_SECRET: &str = "test-session-secret";

/// Canned answer of the stub auth service.
pub enum StubResponse {
    Success(SessionProfile),
    Rejected(u16),
    Malformed,
}

/// Auth service stand-in that replays queued responses and counts calls.
#[derive(Default)]
pub struct StubAuthApi {
    responses: Mutex<VecDeque<StubResponse>>,
    requests: Mutex<Vec<(String, String)>>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl StubAuthApi {
    pub fn new(responses: Vec<StubResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    /// Holds every call until `gate` is notified.
    pub fn gated(responses: Vec<StubResponse>, gate: Arc<Notify>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(account, password)` pairs received so far.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthApi for StubAuthApi {
    async fn sign_in(&self, request: &SignInRequest) -> Result<SessionProfile, AuthApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((request.account.clone(), request.password.clone()));

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(StubResponse::Success(profile)) => Ok(profile),
            Some(StubResponse::Rejected(status)) => Err(AuthApiError::Rejected { status }),
            Some(StubResponse::Malformed) | None => {
                let err = serde_json::from_str::<SessionProfile>("{}").unwrap_err();
                Err(AuthApiError::MalformedPayload(err))
            }
        }
    }
}

pub fn sample_profile(access_token: &str, grade: i64) -> SessionProfile {
    SessionProfile {
        access_token: access_token.to_string(),
        refresh_token: format!("refresh-{access_token}"),
        account: "student01".to_string(),
        name: "Kim Minji".to_string(),
        nickname: Some("minji".to_string()),
        gender: Some("F".to_string()),
        grade: grade.into(),
        major: Some("Computer Science".to_string()),
        minor: Some("Mathematics".to_string()),
        phone_number: Some("010-1234-5678".to_string()),
        student_id: "20231234".to_string(),
        kakao_account: Some(format!("kakao-{access_token}")),
    }
}

pub struct TestContext {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub auth_api: Arc<StubAuthApi>,
}

pub fn create_test_state(auth_api: StubAuthApi) -> TestContext {
    let store = Arc::new(MemoryStore::new());
    let auth_api = Arc::new(auth_api);
    let state = build_state(auth_api.clone(), store.clone());

    TestContext {
        state,
        store,
        auth_api,
    }
}

pub fn build_state(auth_api: Arc<dyn AuthApi>, store: Arc<dyn KeyValueStore>) -> AppState {
    let sessions = Arc::new(SessionManager::new(
        store,
        SESSION_SECRET.to_string(),
        3600,
    ));
    let login_service = Arc::new(LoginService::new(auth_api, sessions));

    AppState::new(login_service, false)
}

/// Store whose backend is always unreachable.
pub struct UnreachableStore;

#[async_trait]
impl KeyValueStore for UnreachableStore {
    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::ConnectionError("connection refused".into()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl_seconds: Option<u64>) -> StoreResult<()> {
        Err(StoreError::ConnectionError("connection refused".into()))
    }

    async fn delete(&self, _key: &str) -> StoreResult<()> {
        Err(StoreError::ConnectionError("connection refused".into()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}
