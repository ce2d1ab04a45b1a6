use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

pub const DEFAULT_UPSTREAM_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_REFERER: &str = "https://aimultitool.app";
pub const DEFAULT_TITLE: &str = "AI MultiTool";
pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:8080";

/// Relay server settings, read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub bind_addr: String,
    pub port: u16,
    pub upstream_url: String,
    pub referer: String,
    pub title: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(defaults.port),
            upstream_url: env::var("OPENROUTER_URL").unwrap_or(defaults.upstream_url),
            referer: env::var("APP_REFERER").unwrap_or(defaults.referer),
            title: env::var("APP_TITLE").unwrap_or(defaults.title),
        }
    }
}

/// Terminal client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub relay_url: String,
    pub settings_path: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        let relay_url = env::var("RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string());
        let settings_path = match env::var("MULTITOOL_SETTINGS") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_settings_path()?,
        };
        Ok(Self {
            relay_url,
            settings_path,
        })
    }
}

fn default_settings_path() -> Result<PathBuf> {
    let config_dir =
        dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;
    Ok(config_dir.join("ai-multitool").join("settings.json"))
}
