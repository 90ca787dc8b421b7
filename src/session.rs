//! Session module - holds the credential pair and cached identity
//!
//! Credentials live in a key-value store behind the `SessionStore` trait so
//! callers can pick in-memory or file-backed persistence. The `Session`
//! object is passed explicitly to every authorized call and owns the
//! single-flight gate around the token refresh path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::sync::Arc;

use tokio::sync::Mutex as TokioMutex;
use tracing::{debug, warn};

use crate::error::Result;
use crate::model::structs::{LoginResponse, Role};

pub const ACCESS_KEY: &str = "access";
pub const REFRESH_KEY: &str = "refresh";
pub const ROLE_KEY: &str = "user_role";
pub const EMAIL_KEY: &str = "user_email";

const SESSION_KEYS: [&str; 4] = [ACCESS_KEY, REFRESH_KEY, ROLE_KEY, EMAIL_KEY];

/// Key-value persistence for session state. Writes are last-write-wins; the
/// store itself performs no concurrency control beyond single-key atomicity.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    fn clear(&self);
}

/// Volatile store for tests and short-lived tooling.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.write().unwrap().remove(key);
    }

    fn clear(&self) {
        self.values.write().unwrap().clear();
    }
}

/// JSON-file-backed store, the CLI's analog of browser local storage.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    values: RwLock<HashMap<String, String>>,
}

impl FileSessionStore {
    /// Opens the store at `path`, loading any previously persisted session.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(_) => HashMap::new(),
        };
        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("training_core")
            .join("session.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("failed to create session directory: {e}");
                return;
            }
        }
        let contents = match serde_json::to_string_pretty(values) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("failed to encode session state: {e}");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, contents) {
            warn!("failed to persist session state: {e}");
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut values = self.values.write().unwrap();
        values.insert(key.to_string(), value.to_string());
        self.persist(&values);
    }

    fn remove(&self, key: &str) {
        let mut values = self.values.write().unwrap();
        values.remove(key);
        self.persist(&values);
    }

    fn clear(&self) {
        let mut values = self.values.write().unwrap();
        values.clear();
        self.persist(&values);
    }
}

/// Explicit session context passed to every authorized gateway call.
pub struct Session {
    store: Arc<dyn SessionStore>,
    refresh_gate: TokioMutex<()>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            refresh_gate: TokioMutex::new(()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Overwrites the credential pair and identity cache from a successful
    /// login response.
    pub fn apply_login(&self, login: &LoginResponse) {
        self.store.set(ACCESS_KEY, &login.access);
        self.store.set(REFRESH_KEY, &login.refresh);
        self.store.set(ROLE_KEY, login.user.role.as_str());
        self.store.set(EMAIL_KEY, &login.user.email);
        debug!(email = %login.user.email, "session credentials stored");
    }

    /// Supersedes the access credential after a successful refresh exchange.
    pub fn apply_refresh(&self, access: &str) {
        self.store.set(ACCESS_KEY, access);
        debug!("access credential refreshed");
    }

    pub fn access(&self) -> Option<String> {
        self.store.get(ACCESS_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.store.get(REFRESH_KEY)
    }

    /// Cached role tag from the last login. UI convenience only, never an
    /// authorization source of truth.
    pub fn role(&self) -> Option<Role> {
        self.store.get(ROLE_KEY).and_then(|tag| Role::from_tag(&tag))
    }

    pub fn email(&self) -> Option<String> {
        self.store.get(EMAIL_KEY)
    }

    /// Erases all session state. Safe to call repeatedly.
    pub fn teardown(&self) {
        for key in SESSION_KEYS {
            self.store.remove(key);
        }
        debug!("session torn down");
    }

    pub fn is_empty(&self) -> bool {
        SESSION_KEYS.iter().all(|key| self.store.get(key).is_none())
    }

    pub(crate) async fn refresh_gate(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.refresh_gate.lock().await
    }
}
