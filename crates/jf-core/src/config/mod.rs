//! # Configuration DTO / 配置数据
//!
//! Data only: TOML → [`AppConfig`] mapping. Reading the file and choosing its
//! location belong to the bootstrap layer.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api";
pub const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CATALOG_FRESHNESS_SECS: u64 = 300;
pub const DEFAULT_CATALOG_RETRY_BUDGET: u32 = 1;
pub const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SIMULATED_LATENCY_MS: u64 = 1200;
pub const DEFAULT_SIMULATED_FAILURE_RATE: f64 = 0.1;

/// Which membership backend the wizard talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceMode {
    /// Real endpoints under `api.base_url`.
    Http,
    /// In-process service with fixture data.
    #[default]
    Simulated,
}

impl ServiceMode {
    fn parse(value: &str) -> anyhow::Result<Self> {
        match value {
            "http" => Ok(ServiceMode::Http),
            "simulated" => Ok(ServiceMode::Simulated),
            other => anyhow::bail!("unknown service mode '{other}' (expected \"http\" or \"simulated\")"),
        }
    }
}

/// Application configuration DTO
/// 应用配置 DTO
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub submit_timeout: Duration,

    /// How long fetched catalog data stays fresh.
    pub catalog_freshness: Duration,
    /// Extra attempts after a failed catalog fetch.
    pub catalog_retry_budget: u32,
    /// Per-request timeout for catalog GETs, independent of `submit_timeout`.
    pub catalog_timeout: Duration,

    /// Directory holding the snapshot and the log file.
    /// Empty means "let the bootstrap decide".
    pub data_dir: PathBuf,

    pub service_mode: ServiceMode,
    pub simulated_latency: Duration,
    pub simulated_failure_rate: f64,
}

impl AppConfig {
    /// Create AppConfig from TOML value. Missing keys take their defaults.
    /// 从 TOML 值创建 AppConfig，缺失的键使用默认值。
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let get = |table: &str, key: &str| toml_value.get(table).and_then(|t| t.get(key));
        let defaults = Self::default();

        let service_mode = match get("service", "mode").and_then(|v| v.as_str()) {
            Some(mode) => ServiceMode::parse(mode)?,
            None => defaults.service_mode,
        };

        Ok(Self {
            api_base_url: get("api", "base_url")
                .and_then(|v| v.as_str())
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            submit_timeout: get("api", "submit_timeout_secs")
                .and_then(|v| v.as_integer())
                .map(|secs| Duration::from_secs(secs.max(0) as u64))
                .unwrap_or(defaults.submit_timeout),
            catalog_freshness: get("catalog", "freshness_secs")
                .and_then(|v| v.as_integer())
                .map(|secs| Duration::from_secs(secs.max(0) as u64))
                .unwrap_or(defaults.catalog_freshness),
            catalog_retry_budget: get("catalog", "retry_budget")
                .and_then(|v| v.as_integer())
                .map(|n| n.clamp(0, i64::from(u32::MAX)) as u32)
                .unwrap_or(defaults.catalog_retry_budget),
            catalog_timeout: get("catalog", "timeout_secs")
                .and_then(|v| v.as_integer())
                .map(|secs| Duration::from_secs(secs.max(0) as u64))
                .unwrap_or(defaults.catalog_timeout),
            data_dir: get("storage", "data_dir")
                .and_then(|v| v.as_str())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            service_mode,
            simulated_latency: get("simulated", "latency_ms")
                .and_then(|v| v.as_integer())
                .map(|ms| Duration::from_millis(ms.max(0) as u64))
                .unwrap_or(defaults.simulated_latency),
            simulated_failure_rate: get("simulated", "failure_rate")
                .and_then(|v| v.as_float().or_else(|| v.as_integer().map(|n| n as f64)))
                .map(|rate| rate.clamp(0.0, 1.0))
                .unwrap_or(defaults.simulated_failure_rate),
        })
    }

    /// Defaults rooted at a platform data directory.
    /// 生产环境使用：以平台数据目录为根的默认配置。
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..Self::default()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            submit_timeout: Duration::from_secs(DEFAULT_SUBMIT_TIMEOUT_SECS),
            catalog_freshness: Duration::from_secs(DEFAULT_CATALOG_FRESHNESS_SECS),
            catalog_retry_budget: DEFAULT_CATALOG_RETRY_BUDGET,
            catalog_timeout: Duration::from_secs(DEFAULT_CATALOG_TIMEOUT_SECS),
            data_dir: PathBuf::new(),
            service_mode: ServiceMode::default(),
            simulated_latency: Duration::from_millis(DEFAULT_SIMULATED_LATENCY_MS),
            simulated_failure_rate: DEFAULT_SIMULATED_FAILURE_RATE,
        }
    }
}
