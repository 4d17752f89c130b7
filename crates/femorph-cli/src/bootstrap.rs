//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where the `femorph-api` adapters are
//! instantiated. Command handlers receive a [`CliContext`] and only see the
//! core ports.

use std::fmt;
use std::sync::Arc;

use femorph_api::{ApiClientConfig, FemorphClient, TaskWatcher};
use femorph_core::{SessionPort, TaskWatcherPort};
use tracing::debug;

use crate::error::CliError;

const ENV_USERNAME: &str = "FEMORPH_USERNAME";
const ENV_PASSWORD: &str = "FEMORPH_PASSWORD";
const ENV_HOST: &str = "FEMORPH_HOST";
const ENV_INSECURE: &str = "FEMORPH_INSECURE";
const ENV_BASE_URL: &str = "FEMORPH_BASE_URL";
const ENV_WS_URL: &str = "FEMORPH_WS_URL";

/// Bootstrap configuration for the CLI.
#[derive(Clone)]
pub struct CliConfig {
    /// Account used for every authenticated call.
    pub username: String,
    /// Password of that account.
    pub password: String,
    /// Endpoints and timeouts for the API adapters.
    pub api: ApiClientConfig,
}

impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("api", &self.api)
            .finish()
    }
}

impl CliConfig {
    /// Build the configuration from process environment variables.
    ///
    /// `FEMORPH_USERNAME` and `FEMORPH_PASSWORD` are required.
    /// `FEMORPH_HOST` (with `FEMORPH_INSECURE=1` for plain HTTP) selects the
    /// server; `FEMORPH_BASE_URL` and `FEMORPH_WS_URL` override the derived
    /// endpoints individually.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| CliError::Config(format!("{key} must be set")))
        };

        let username = require(ENV_USERNAME)?;
        let password = require(ENV_PASSWORD)?;

        let mut api = match get(ENV_HOST) {
            Some(host) => {
                let insecure = get(ENV_INSECURE).is_some_and(|v| is_truthy(&v));
                ApiClientConfig::for_host(host.trim(), !insecure)
            }
            None => ApiClientConfig::new(),
        };
        if let Some(url) = get(ENV_BASE_URL) {
            api = api.with_base_url(url);
        }
        if let Some(url) = get(ENV_WS_URL) {
            api = api.with_ws_url(url);
        }

        Ok(Self {
            username,
            password,
            api,
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// Request/response calls against the API.
    pub session: Arc<dyn SessionPort>,
    /// Task completion watcher.
    pub watcher: Arc<dyn TaskWatcherPort>,
    /// Account used for every authenticated call.
    pub username: String,
    /// Password of that account.
    pub password: String,
}

impl CliContext {
    /// Access the session port.
    pub fn session(&self) -> &Arc<dyn SessionPort> {
        &self.session
    }

    /// Access the task watcher port.
    pub fn watcher(&self) -> &Arc<dyn TaskWatcherPort> {
        &self.watcher
    }
}

/// Bootstrap the CLI application.
///
/// Creates the HTTP session client and the WebSocket task watcher from the
/// same API configuration.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    debug!(
        base_url = config.api.base_url(),
        ws_url = config.api.ws_url(),
        "Bootstrapping femorph client"
    );

    let client =
        FemorphClient::new(&config.api).map_err(|e| CliError::Config(e.to_string()))?;
    let watcher = TaskWatcher::new(&config.api).map_err(|e| CliError::Config(e.to_string()))?;

    Ok(CliContext {
        session: Arc::new(client),
        watcher: Arc::new(watcher),
        username: config.username,
        password: config.password,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_credentials_required() {
        let err = CliConfig::from_lookup(lookup(&[(ENV_USERNAME, "a@b.c")])).unwrap_err();
        assert!(matches!(err, CliError::Config(ref m) if m.contains(ENV_PASSWORD)));
        assert_eq!(err.exit_code(), 78);

        let err = CliConfig::from_lookup(lookup(&[(ENV_USERNAME, ""), (ENV_PASSWORD, "pw")]))
            .unwrap_err();
        assert!(matches!(err, CliError::Config(ref m) if m.contains(ENV_USERNAME)));
    }

    #[test]
    fn test_production_defaults() {
        let config =
            CliConfig::from_lookup(lookup(&[(ENV_USERNAME, "a@b.c"), (ENV_PASSWORD, "pw")]))
                .unwrap();
        assert_eq!(config.api.base_url(), "https://api.femorph.com");
        assert_eq!(config.api.ws_url(), "ws://api.femorph.com/ws/subscribe");
    }

    #[test]
    fn test_local_host() {
        let config = CliConfig::from_lookup(lookup(&[
            (ENV_USERNAME, "a@b.c"),
            (ENV_PASSWORD, "pw"),
            (ENV_HOST, "localhost:8000"),
            (ENV_INSECURE, "1"),
        ]))
        .unwrap();
        assert_eq!(config.api.base_url(), "http://localhost:8000");
        assert_eq!(config.api.ws_url(), "ws://localhost:8000/ws/subscribe");
    }

    #[test]
    fn test_url_overrides() {
        let config = CliConfig::from_lookup(lookup(&[
            (ENV_USERNAME, "a@b.c"),
            (ENV_PASSWORD, "pw"),
            (ENV_HOST, "localhost:8000"),
            (ENV_BASE_URL, "http://127.0.0.1:9000"),
            (ENV_WS_URL, "ws://127.0.0.1:9001/ws/subscribe"),
        ]))
        .unwrap();
        assert_eq!(config.api.base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.api.ws_url(), "ws://127.0.0.1:9001/ws/subscribe");
    }

    #[test]
    fn test_debug_redacts_password() {
        let config =
            CliConfig::from_lookup(lookup(&[(ENV_USERNAME, "a@b.c"), (ENV_PASSWORD, "hunter2")]))
                .unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("a@b.c"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_bootstrap_rejects_bad_url() {
        let mut config =
            CliConfig::from_lookup(lookup(&[(ENV_USERNAME, "a@b.c"), (ENV_PASSWORD, "pw")]))
                .unwrap();
        config.api = config.api.with_ws_url("not a url");
        assert!(matches!(bootstrap(config), Err(CliError::Config(_))));
    }
}
