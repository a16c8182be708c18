use serde::{Deserialize, Serialize};
use std::fs;

use super::session_service::get_app_data_dir;
use crate::error::{Result, WhisperError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub base_url: Option<String>,
}

fn get_config_path() -> Result<std::path::PathBuf> {
    Ok(get_app_data_dir()?.join("config.json"))
}

pub fn load_config() -> Result<Config> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&config_path)?;
    serde_json::from_str(&content)
        .map_err(|e| WhisperError::Config(format!("failed to parse config: {}", e)))
}

pub fn save_config(config: &Config) -> Result<()> {
    let config_path = get_config_path()?;
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| WhisperError::Config(format!("failed to serialize config: {}", e)))?;
    fs::write(&config_path, content)?;
    Ok(())
}

pub fn get_base_url() -> Result<String> {
    let config = load_config()?;
    Ok(config
        .base_url
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))
}

pub fn set_base_url(url: &str) -> Result<()> {
    let mut config = load_config().unwrap_or_default();
    config.base_url = Some(url.trim_end_matches('/').to_string());
    save_config(&config)
}
