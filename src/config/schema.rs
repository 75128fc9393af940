//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::auth::Role;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub server: ServerConfig,

    /// Routes added to (or replacing entries of) the built-in portal table
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// Backend API the portals talk to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:4000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Join a path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Persisted session store location and keys
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,

    #[serde(default = "default_session_key")]
    pub session_key: String,

    #[serde(default = "default_token_key")]
    pub token_key: String,

    #[serde(default = "default_driver_key")]
    pub driver_key: String,

    /// Role-specific cached values cleared on logout
    #[serde(default = "default_cache_keys")]
    pub cache_keys: Vec<String>,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("./.ridegate/session.json")
}

fn default_session_key() -> String {
    "user".to_string()
}

fn default_token_key() -> String {
    "token".to_string()
}

fn default_driver_key() -> String {
    "driverData".to_string()
}

fn default_cache_keys() -> Vec<String> {
    vec!["driverId".to_string(), "userId".to_string()]
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            session_key: default_session_key(),
            token_key: default_token_key(),
            driver_key: default_driver_key(),
            cache_keys: default_cache_keys(),
        }
    }
}

/// Server configuration for the decision service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4173
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Route category as written in config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessKind {
    /// No guard
    Open,
    /// Guests only
    Public,
    /// Session required
    Protected,
}

/// A route declared in config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    pub path: String,

    pub access: AccessKind,

    /// Only meaningful for protected routes; empty means any role
    #[serde(default)]
    pub roles: Vec<Role>,
}
