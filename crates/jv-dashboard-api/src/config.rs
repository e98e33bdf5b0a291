//! Dashboard service configuration, loadable from TOML and overridable from
//! the environment.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level dashboard service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Listen address (e.g., "0.0.0.0").
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upstream ticket and cost API.
    #[serde(default)]
    pub backend: BackendConfig,
    /// JSON file holding the user's dashboard preferences.
    #[serde(default = "default_preferences_path")]
    pub preferences_path: PathBuf,
}

/// Upstream API connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from("jarvis_user_state.json")
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            backend: BackendConfig::default(),
            preferences_path: default_preferences_path(),
        }
    }
}

impl DashboardConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Apply `JARVIS_*` overrides read through `lookup`.
    ///
    /// Unparseable numeric values are logged and ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("JARVIS_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("JARVIS_PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.port = port,
                Err(e) => tracing::warn!(value = %port, error = %e, "ignoring invalid JARVIS_PORT"),
            }
        }
        if let Some(url) = lookup("JARVIS_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Some(secs) = lookup("JARVIS_BACKEND_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => self.backend.timeout_secs = secs,
                Err(e) => tracing::warn!(
                    value = %secs,
                    error = %e,
                    "ignoring invalid JARVIS_BACKEND_TIMEOUT_SECS"
                ),
            }
        }
        if let Some(path) = lookup("JARVIS_PREFERENCES_PATH") {
            self.preferences_path = PathBuf::from(path);
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
