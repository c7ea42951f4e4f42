//! In-memory stand-ins for the external collaborators, shared by unit and router tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::identity::{IdentityError, IdentityProvider, IdentityRecord};
use crate::auth::revocation::SessionRevocations;
use crate::auth::service::AuthService;
use crate::auth::session::SessionSigner;
use crate::auth::users::UserStore;
use crate::config::Config;
use crate::errors::StoreError;
use crate::interviews::store::InterviewStore;
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::interview::{Interview, NewInterview};
use crate::models::user::UserProfile;
use crate::presentation::icons::TechIconResolver;
use crate::state::AppState;

pub const TEST_SESSION_SECRET: &str = "test-session-secret";

pub fn sample_interview(user_id: &str, created_at: &str) -> Interview {
    NewInterview {
        role: "Backend Engineer".to_string(),
        interview_type: "Technical".to_string(),
        level: "Senior".to_string(),
        techstack: vec!["Rust".to_string(), "PostgreSQL".to_string()],
        questions: vec!["Explain ownership.".to_string()],
        user_id: user_id.to_string(),
        finalized: true,
        cover_image: "/covers/adobe.png".to_string(),
        created_at: created_at.to_string(),
    }
    .into_stored(Uuid::new_v4())
}

// ────────────────────────────────────────────────────────────────────────────
// Interview store
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryInterviewStore {
    records: Mutex<Vec<Interview>>,
    reads: AtomicUsize,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryInterviewStore {
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn seed(&self, interview: Interview) {
        self.records.lock().unwrap().push(interview);
    }

    pub fn all(&self) -> Vec<Interview> {
        self.records.lock().unwrap().clone()
    }

    pub fn read_calls(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn read(&self) -> Result<Vec<Interview>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(self.all())
    }
}

#[async_trait]
impl InterviewStore for MemoryInterviewStore {
    async fn insert(&self, interview: NewInterview) -> Result<Interview, StoreError> {
        if self.fail_writes {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        let stored = interview.into_stored(Uuid::new_v4());
        self.seed(stored.clone());
        Ok(stored)
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Interview>, StoreError> {
        let mut owned: Vec<_> = self
            .read()?
            .into_iter()
            .filter(|i| i.user_id == user_id)
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn find_latest_excluding(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<Interview>, StoreError> {
        let mut others: Vec<_> = self
            .read()?
            .into_iter()
            .filter(|i| i.user_id != user_id)
            .collect();
        others.sort_by(|a, b| {
            a.user_id
                .cmp(&b.user_id)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        others.truncate(limit as usize);
        Ok(others)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Model
// ────────────────────────────────────────────────────────────────────────────

pub struct StubGenerator {
    reply: Result<String, String>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl StubGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        self.reply.clone().map_err(|message| LlmError::Api {
            status: 503,
            message,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Auth collaborators
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<String, UserProfile>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get(&self, uid: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.users.lock().unwrap().get(uid).cloned())
    }

    async fn create(&self, profile: &UserProfile) -> Result<bool, StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&profile.id) {
            return Ok(false);
        }
        users.insert(profile.id.clone(), profile.clone());
        Ok(true)
    }
}

/// Knows one account: `good-token` → uid `uid-ada`, `ada@example.com`.
#[derive(Default)]
pub struct StubIdentity {
    unavailable: bool,
}

impl StubIdentity {
    pub fn failing() -> Self {
        Self { unavailable: true }
    }
}

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn lookup(&self, id_token: &str) -> Result<Option<IdentityRecord>, IdentityError> {
        if self.unavailable {
            return Err(IdentityError::Rejected {
                status: 503,
                message: "identity provider unavailable".to_string(),
            });
        }
        Ok((id_token == "good-token").then(|| IdentityRecord {
            uid: "uid-ada".to_string(),
            email: Some("ada@example.com".to_string()),
        }))
    }
}

#[derive(Default)]
pub struct MemoryRevocations {
    revoked: Mutex<HashSet<String>>,
    checks: AtomicUsize,
}

impl MemoryRevocations {
    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionRevocations for MemoryRevocations {
    async fn revoke(&self, token_id: &str, _ttl_secs: u64) -> Result<(), redis::RedisError> {
        self.revoked.lock().unwrap().insert(token_id.to_string());
        Ok(())
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, redis::RedisError> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        Ok(self.revoked.lock().unwrap().contains(token_id))
    }
}

pub fn test_auth_service(identity: StubIdentity) -> AuthService {
    test_auth_service_with(identity, Arc::new(MemoryRevocations::default()))
}

pub fn test_auth_service_with(
    identity: StubIdentity,
    revocations: Arc<MemoryRevocations>,
) -> AuthService {
    AuthService::new(
        SessionSigner::new(TEST_SESSION_SECRET),
        Arc::new(MemoryUserStore::default()),
        Arc::new(identity),
        revocations,
    )
}

// ────────────────────────────────────────────────────────────────────────────
// App state
// ────────────────────────────────────────────────────────────────────────────

pub fn test_state(llm: Arc<StubGenerator>, interviews: Arc<MemoryInterviewStore>) -> AppState {
    let config = Config::for_tests();
    AppState {
        llm,
        interviews,
        auth: test_auth_service(StubIdentity::default()),
        icons: TechIconResolver::new(reqwest::Client::new(), config.icon_cdn_base_url.clone()),
        config,
    }
}
