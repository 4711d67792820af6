//! Explicit session context for authorized backend calls.
//!
//! The credential lives in a store behind a trait so the console, tests, and
//! any future keyring integration share one contract: get, set, clear. The
//! context is constructed once at startup and threaded into every operation
//! that needs authorization; nothing reads a global.

use std::sync::{Arc, Mutex};

use crate::config::BackendConfig;

/// Credential storage boundary.
pub trait CredentialStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: String);
    fn clear(&self);
}

/// Process-local credential store, seeded from configuration.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl InMemoryCredentialStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn token(&self) -> Option<String> {
        self.token.lock().expect("credential mutex poisoned").clone()
    }

    fn set_token(&self, token: String) {
        *self.token.lock().expect("credential mutex poisoned") = Some(token);
    }

    fn clear(&self) {
        *self.token.lock().expect("credential mutex poisoned") = None;
    }
}

/// One session against one scoring backend: base URL plus credential store.
#[derive(Clone)]
pub struct SessionContext {
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl SessionContext {
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn CredentialStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            credentials,
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        let store = match &config.token {
            Some(token) => InMemoryCredentialStore::with_token(token.clone()),
            None => InMemoryCredentialStore::default(),
        };
        Self::new(config.base_url.clone(), Arc::new(store))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &dyn CredentialStore {
        self.credentials.as_ref()
    }

    /// Absolute URL for a backend path such as `/ingest/applicants`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
