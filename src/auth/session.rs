//! Session resolution from the persisted store

use crate::auth::models::{Role, Session, SessionRecord};
use crate::auth::store::SessionStore;
use crate::config::StorageConfig;

/// Store keys for the session artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKeys {
    /// Serialized session record
    pub session: String,
    /// Denormalized bearer token slot
    pub token: String,
    /// Serialized driver profile, written by the driver login flow
    pub driver: String,
    /// Role-specific cached values cleared on logout
    pub cache: Vec<String>,
}

impl Default for SessionKeys {
    fn default() -> Self {
        Self::from(&StorageConfig::default())
    }
}

impl From<&StorageConfig> for SessionKeys {
    fn from(config: &StorageConfig) -> Self {
        Self {
            session: config.session_key.clone(),
            token: config.token_key.clone(),
            driver: config.driver_key.clone(),
            cache: config.cache_keys.clone(),
        }
    }
}

impl SessionKeys {
    /// Every key a logout has to clear
    pub fn all(&self) -> Vec<&str> {
        let mut keys = vec![self.session.as_str(), self.token.as_str(), self.driver.as_str()];
        keys.extend(self.cache.iter().map(String::as_str));
        keys
    }
}

/// Reads the persisted session and classifies it
pub struct SessionResolver<S> {
    store: S,
    keys: SessionKeys,
}

impl<S: SessionStore> SessionResolver<S> {
    pub fn new(store: S, keys: SessionKeys) -> Self {
        Self { store, keys }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }

    /// Resolve the current session. Malformed or missing data yields the absent session.
    pub fn resolve(&self) -> Session {
        if let Some(record) = self.read_record(&self.keys.driver) {
            if let Some(token) = record.token() {
                let session = Session::new(Some(token.to_string()), Some(Role::Driver));
                self.cache_token(token);
                return session;
            }
            tracing::debug!("Driver profile has no token, falling back to session record");
        }

        let Some(record) = self.read_record(&self.keys.session) else {
            return Session::absent();
        };
        let session = record.to_session();
        if let Some(token) = session.token.as_deref() {
            self.cache_token(token);
        }
        session
    }

    fn read_record(&self, key: &str) -> Option<SessionRecord> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read '{}' from session store: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str::<SessionRecord>(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!("Ignoring malformed '{}' record: {}", key, e);
                None
            }
        }
    }

    fn cache_token(&self, token: &str) {
        if let Err(e) = self.store.set(&self.keys.token, token) {
            tracing::warn!("Failed to cache session token: {}", e);
        }
    }
}
