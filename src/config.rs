use anyhow::{Context, Result};
use log::warn;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Where and how the client reaches the logbook backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// On-disk shape of `client.json`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Default location: `<config dir>/noty/client.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("noty").join("client.json"))
    }

    /// Defaults, then the config file, then `NOTY_API_URL` / `NOTY_TIMEOUT_SECS`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = path {
            config.apply_file(path)?;
        }
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read client config from {}", path.display()))?;
        let file: ConfigFile = match serde_json::from_str(&contents) {
            Ok(file) => file,
            Err(err) => {
                warn!("Ignoring malformed client config {}: {err}", path.display());
                ConfigFile::default()
            }
        };

        if let Some(base_url) = file.base_url.filter(|url| !url.trim().is_empty()) {
            self.base_url = base_url;
        }
        if let Some(secs) = file.timeout_secs.filter(|secs| *secs > 0) {
            self.request_timeout = Duration::from_secs(secs);
        }
        Ok(())
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(base_url) = var("NOTY_API_URL").filter(|url| !url.trim().is_empty()) {
            self.base_url = base_url;
        }
        if let Some(raw) = var("NOTY_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.request_timeout = Duration::from_secs(secs),
                _ => warn!("Ignoring invalid NOTY_TIMEOUT_SECS value '{raw}'"),
            }
        }
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        self
    }
}
