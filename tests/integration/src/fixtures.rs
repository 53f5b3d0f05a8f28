//! In-memory stand-ins for the data store, cache, mailer and database probe

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use matchday_cache::{CacheResult, CacheStore};
use matchday_common::hash_password;
use matchday_core::entities::{RefreshTokenRecord, User};
use matchday_core::error::DomainError;
use matchday_core::traits::{
    RefreshTokenRepository, RepoResult, UserRepository, VerificationMailer,
};
use matchday_core::value_objects::{AccessFlags, UserId};
use matchday_service::DatabaseProbe;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A fresh e-mail address
pub fn unique_email() -> String {
    format!("player{}@example.com", unique_suffix())
}

pub const TEST_PASSWORD: &str = "Kickoff-2024!";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

// ============================================================================
// Users
// ============================================================================

#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<HashMap<UserId, (User, String)>>,
}

impl MemoryUserRepository {
    /// Insert a user with `TEST_PASSWORD`
    pub fn seed(&self, email: &str, flags: AccessFlags, verified: bool) -> User {
        let mut user = User::new(UserId::generate(), email.to_string());
        user.set_flags(flags);
        if verified {
            user.mark_verified();
        }
        let hash = hash_password(TEST_PASSWORD).unwrap();
        lock(&self.users).insert(user.id, (user.clone(), hash));
        user
    }

    /// Change a user's flags behind the server's back
    pub fn set_flags(&self, id: UserId, flags: AccessFlags) {
        if let Some((user, _)) = lock(&self.users).get_mut(&id) {
            user.set_flags(flags);
        }
    }

    pub fn get(&self, id: UserId) -> Option<User> {
        lock(&self.users).get(&id).map(|(user, _)| user.clone())
    }

    pub fn find_email(&self, email: &str) -> Option<User> {
        lock(&self.users)
            .values()
            .find(|(user, _)| user.email == email)
            .map(|(user, _)| user.clone())
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self.find_email(&email.to_lowercase()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.find_email(&email.to_lowercase()).is_some())
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        if self.find_email(&user.email).is_some() {
            return Err(DomainError::EmailAlreadyExists);
        }
        lock(&self.users).insert(user.id, (user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn delete(&self, id: UserId) -> RepoResult<()> {
        lock(&self.users)
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::UserNotFound(id))
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        Ok(lock(&self.users).get(&id).map(|(_, hash)| hash.clone()))
    }
}

// ============================================================================
// Refresh tokens
// ============================================================================

/// One slot per user, like the `refresh_tokens` table
#[derive(Default)]
pub struct MemoryRefreshTokenRepository {
    slots: Mutex<HashMap<UserId, RefreshTokenRecord>>,
}

impl MemoryRefreshTokenRepository {
    pub fn token_for(&self, user_id: UserId) -> Option<String> {
        lock(&self.slots).get(&user_id).map(|r| r.token.clone())
    }

    pub fn len(&self) -> usize {
        lock(&self.slots).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RefreshTokenRepository for MemoryRefreshTokenRepository {
    async fn upsert_for_user(&self, record: &RefreshTokenRecord) -> RepoResult<()> {
        lock(&self.slots).insert(record.user_id, record.clone());
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> RepoResult<Option<RefreshTokenRecord>> {
        Ok(lock(&self.slots)
            .values()
            .find(|r| r.token == token)
            .cloned())
    }

    async fn delete_for_user(&self, user_id: UserId) -> RepoResult<u64> {
        Ok(u64::from(lock(&self.slots).remove(&user_id).is_some()))
    }
}

// ============================================================================
// Cache
// ============================================================================

/// Key-value store whose TTLs run on a virtual clock
#[derive(Default)]
pub struct MemoryCache {
    inner: Mutex<CacheInner>,
}

#[derive(Default)]
struct CacheInner {
    now: u64,
    entries: HashMap<String, (String, Option<u64>)>,
}

impl CacheInner {
    fn live(&mut self, key: &str) -> Option<&mut (String, Option<u64>)> {
        let now = self.now;
        if matches!(self.entries.get(key), Some((_, Some(deadline))) if *deadline <= now) {
            self.entries.remove(key);
        }
        self.entries.get_mut(key)
    }
}

impl MemoryCache {
    /// Move the virtual clock forward
    pub fn advance(&self, seconds: u64) {
        lock(&self.inner).now += seconds;
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(lock(&self.inner).live(key).map(|(v, _)| v.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        let mut inner = lock(&self.inner);
        let deadline = inner.now + ttl_seconds;
        inner
            .entries
            .insert(key.to_string(), (value.to_string(), Some(deadline)));
        Ok(())
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        Ok(lock(&self.inner).live(key).is_some())
    }

    async fn increment(&self, key: &str) -> CacheResult<i64> {
        let mut inner = lock(&self.inner);
        if let Some((value, _)) = inner.live(key) {
            let next = value.parse::<i64>().unwrap_or(0) + 1;
            *value = next.to_string();
            return Ok(next);
        }
        inner.entries.insert(key.to_string(), ("1".to_string(), None));
        Ok(1)
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let mut inner = lock(&self.inner);
        let existed = inner.live(key).is_some();
        inner.entries.remove(key);
        Ok(existed)
    }

    async fn ping(&self) -> CacheResult<()> {
        Ok(())
    }
}

// ============================================================================
// Mailer and probes
// ============================================================================

/// Records every verification e-mail; can be switched to fail
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<String>>,
    failing: AtomicBool,
}

impl RecordingMailer {
    pub fn sent_to(&self, email: &str) -> usize {
        lock(&self.sent).iter().filter(|e| *e == email).count()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl VerificationMailer for RecordingMailer {
    async fn send_verification(&self, user: &User) -> RepoResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::MailerError("smtp unavailable".to_string()));
        }
        lock(&self.sent).push(user.email.clone());
        Ok(())
    }
}

/// Database probe with a switchable answer
#[derive(Default)]
pub struct SwitchProbe {
    down: AtomicBool,
}

impl SwitchProbe {
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }
}

#[async_trait]
impl DatabaseProbe for SwitchProbe {
    async fn ping(&self) -> Result<(), String> {
        if self.down.load(Ordering::SeqCst) {
            Err("connection refused".to_string())
        } else {
            Ok(())
        }
    }
}
