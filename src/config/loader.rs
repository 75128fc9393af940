//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::Path;

use super::Config;

pub const CONFIG_FILENAME: &str = "ridegate.toml";

/// Load configuration from ridegate.toml
pub fn load_config() -> Result<Config> {
    let config_path = find_config_file()?;
    load_config_from_path(&config_path)
}

/// Load configuration, falling back to defaults when no file exists
pub fn load_config_or_default() -> Result<Config> {
    match load_config() {
        Err(Error::ConfigNotFound) => {
            tracing::debug!("No {} found, using defaults", CONFIG_FILENAME);
            Ok(Config::default())
        }
        other => other,
    }
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    parse_config(&content)
}

/// Parse configuration text after interpolating environment variables
pub fn parse_config(content: &str) -> Result<Config> {
    let content = interpolate_env_vars(content);
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<std::path::PathBuf> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(Error::ConfigNotFound);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // Constant pattern; a failure here is a bug, not a runtime condition
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# ridegate configuration

[api]
base_url = "${RIDEGATE_API_URL:-http://localhost:4000}"
timeout_secs = 10

[storage]
path = "./.ridegate/session.json"
session_key = "user"
token_key = "token"
driver_key = "driverData"
# Cleared together with the session on logout
cache_keys = ["driverId", "userId"]

[server]
host = "0.0.0.0"
port = 4173

# Extra routes; a path that already exists in the portal table is replaced
# [[routes]]
# path = "/college/reports"
# access = "protected"   # open | public | protected
# roles = ["college"]
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccessKind;

    #[test]
    fn test_env_interpolation() {
        env::set_var("RIDEGATE_TEST_VAR", "hello");
        let content = "value = \"${RIDEGATE_TEST_VAR}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"hello\"");
        env::remove_var("RIDEGATE_TEST_VAR");
    }

    #[test]
    fn test_env_interpolation_with_default() {
        let content = "value = \"${NONEXISTENT_VAR:-default_value}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"default_value\"");
    }

    #[test]
    fn test_default_content_parses() {
        let config = parse_config(default_config_content()).unwrap();
        assert_eq!(config.server.port, 4173);
        assert_eq!(config.storage.session_key, "user");
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_parse_routes() {
        let config = parse_config(
            r#"
[[routes]]
path = "/college/reports"
access = "protected"
roles = ["college"]

[[routes]]
path = "/status"
access = "open"
"#,
        )
        .unwrap();

        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[0].access, AccessKind::Protected);
        assert!(config.routes[1].roles.is_empty());
    }
}
