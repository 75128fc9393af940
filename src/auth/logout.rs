//! Logout: best-effort remote invalidation, unconditional local clear

use crate::auth::guard::LOGIN_PATH;
use crate::auth::session::SessionKeys;
use crate::auth::store::SessionStore;
use crate::config::ApiConfig;
use crate::error::Result;
use serde::Serialize;
use std::time::Duration;
use tokio::task::JoinHandle;

/// What happened to the server-side session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum RemoteLogout {
    Confirmed,
    Failed(String),
}

/// The end-session request, running in the background.
///
/// Dropping it does not cancel the request.
#[derive(Debug)]
pub struct PendingLogout(JoinHandle<RemoteLogout>);

impl PendingLogout {
    /// Wait for the backend's answer
    pub async fn settled(self) -> RemoteLogout {
        match self.0.await {
            Ok(remote) => remote,
            Err(e) => RemoteLogout::Failed(format!("logout request did not complete: {}", e)),
        }
    }
}

#[derive(Debug)]
pub struct LogoutOutcome {
    pub remote: PendingLogout,
    /// Keys that were actually removed
    pub cleared: Vec<String>,
    /// The store could not be read key by key and was wiped instead
    pub store_reset: bool,
    /// Terminal navigation, always the login page
    pub redirect: &'static str,
}

pub struct LogoutFlow<S> {
    client: reqwest::Client,
    endpoint: String,
    store: S,
    keys: SessionKeys,
}

impl<S: SessionStore> LogoutFlow<S> {
    pub fn new(api: &ApiConfig, store: S, keys: SessionKeys) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: api.endpoint("/auth/logout"),
            store,
            keys,
        })
    }

    /// Log out. Local state is cleared first and the redirect is available
    /// immediately; the remote request runs on its own task.
    pub async fn logout(&self) -> LogoutOutcome {
        let (cleared, store_reset) = self.clear_local();
        let remote = tokio::spawn(end_remote_session(
            self.client.clone(),
            self.endpoint.clone(),
        ));

        LogoutOutcome {
            remote: PendingLogout(remote),
            cleared,
            store_reset,
            redirect: LOGIN_PATH,
        }
    }

    fn clear_local(&self) -> (Vec<String>, bool) {
        let mut cleared = Vec::new();
        let mut failed = false;
        for key in self.keys.all() {
            match self.store.get(key) {
                Ok(None) => continue,
                Ok(Some(_)) => {}
                Err(e) => {
                    tracing::warn!("Failed to read '{}' from session store: {}", key, e);
                    failed = true;
                    continue;
                }
            }
            match self.store.remove(key) {
                Ok(()) => cleared.push(key.to_string()),
                Err(e) => {
                    tracing::warn!("Failed to remove '{}' from session store: {}", key, e);
                    failed = true;
                }
            }
        }

        if !failed {
            return (cleared, false);
        }
        match self.store.clear() {
            Ok(()) => {
                tracing::warn!("Session store reset after failed key removal");
                (cleared, true)
            }
            Err(e) => {
                tracing::error!("Failed to reset session store: {}", e);
                (cleared, false)
            }
        }
    }
}

async fn end_remote_session(client: reqwest::Client, endpoint: String) -> RemoteLogout {
    let remote = match client.post(&endpoint).send().await {
        Ok(response) if response.status().is_success() => RemoteLogout::Confirmed,
        Ok(response) => RemoteLogout::Failed(format!("server returned {}", response.status())),
        Err(e) => RemoteLogout::Failed(e.to_string()),
    };

    match &remote {
        RemoteLogout::Confirmed => tracing::info!("Logged out"),
        RemoteLogout::Failed(reason) => {
            tracing::warn!("Remote logout failed, local session cleared anyway: {}", reason)
        }
    }
    remote
}
