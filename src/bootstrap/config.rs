//! # Configuration Loader / 配置加载器
//!
//! Reads `joinflow.toml` and hands the TOML value to
//! [`AppConfig::from_toml`]. Key defaults live in the DTO; this module only
//! decides where the file and the data directory are.

use std::path::{Path, PathBuf};

use anyhow::Context;
use jf_core::config::AppConfig;
use tracing::debug;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "JOINFLOW_CONFIG";
pub const CONFIG_FILE_NAME: &str = "joinflow.toml";
const APP_DIR_NAME: &str = "joinflow";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Config file path: `JOINFLOW_CONFIG`, else `<config dir>/joinflow/joinflow.toml`.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Platform data directory for snapshots and logs.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

/// Load the config at `path` if it exists, otherwise use defaults. An empty
/// `data_dir` is filled with the platform data directory.
pub fn resolve_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let mut config = match path {
        Some(path) if path.exists() => load_config(path)?,
        Some(path) => {
            debug!(path = %path.display(), "no config file, using defaults");
            AppConfig::default()
        }
        None => AppConfig::default(),
    };

    if config.data_dir.as_os_str().is_empty() {
        config.data_dir = default_data_dir();
    }
    Ok(config)
}
