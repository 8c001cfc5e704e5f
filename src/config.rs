//! Configuration
//!
//! Resolved once at start-up from defaults, an optional YAML file and
//! environment overrides (later wins).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reqwest::Url;
use serde::Deserialize;

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_API_URL, DEFAULT_ORIGIN, ENV_API_URL, ENV_ORIGIN,
};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Config {
    /// API base, absolute or relative to `origin`
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Origin a relative `api_url` is resolved against
    #[serde(default = "default_origin")]
    pub origin: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: default_api_url(),
            origin: default_origin(),
        }
    }
}

impl Config {
    /// Load from the default file location and the process environment
    pub fn load() -> Result<Self> {
        let mut config = match default_config_path() {
            Some(path) => Self::from_file(&path)?,
            None => Config::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Read a YAML config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Apply environment overrides; empty values count as unset
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(origin) = non_empty(ENV_ORIGIN) {
            self.origin = origin;
        }
    }

    /// Absolute API base without a trailing slash
    pub fn base_url(&self) -> Result<String> {
        let api_url = self.api_url.trim();
        let resolved = if api_url.starts_with("http://") || api_url.starts_with("https://") {
            Url::parse(api_url).with_context(|| format!("invalid API URL '{}'", api_url))?
        } else {
            let origin = Url::parse(self.origin.trim())
                .with_context(|| format!("invalid origin '{}'", self.origin))?;
            origin
                .join(api_url)
                .with_context(|| format!("cannot resolve '{}' against '{}'", api_url, origin))?
        };
        Ok(resolved.as_str().trim_end_matches('/').to_string())
    }
}

/// `~/.apidash/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
