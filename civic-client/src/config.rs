//! Client configuration

use std::path::PathBuf;

/// Default backend API root
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Client configuration for connecting to the complaint backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root URL (e.g., "http://127.0.0.1:8000/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory holding persisted credentials and logs
    pub data_dir: PathBuf,

    /// Profile name; each name keeps its own credential file
    pub client_name: String,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            data_dir: PathBuf::from(".civic"),
            client_name: "default".to_string(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// `CIVIC_API_URL`, `CIVIC_TIMEOUT_SECS`, `CIVIC_DATA_DIR`, `CIVIC_CLIENT_NAME`.
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("CIVIC_API_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        );
        if let Some(timeout) = std::env::var("CIVIC_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.timeout = timeout;
        }
        if let Some(dir) = std::env::var("CIVIC_DATA_DIR").ok().filter(|s| !s.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(name) = std::env::var("CIVIC_CLIENT_NAME")
            .ok()
            .filter(|s| !s.is_empty())
        {
            config.client_name = name;
        }
        config
    }

    /// Set the API root URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the data directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the profile name
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    /// Path of the persisted credential for this profile
    pub fn credential_path(&self) -> PathBuf {
        self.data_dir.join(&self.client_name).join("credential.json")
    }

    /// Directory for rolling log files
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
