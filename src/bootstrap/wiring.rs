//! # Dependency Injection / 依赖注入模块
//!
//! The only place that depends on `jf-infra` and `jf-app` together. It
//! picks adapters from [`AppConfig`] and assembles [`App`]; it makes no
//! wizard decisions.

use std::sync::Arc;

use jf_app::{App, AppDeps, AppSettings};
use jf_core::config::{AppConfig, ServiceMode};
use jf_core::ports::ClockPort;
use jf_infra::{
    FileRegistrationSnapshotRepository, HttpCatalogClient, HttpRegistrationClient,
    SimulatedMembershipService, SystemClock,
};
use tracing::info;

/// Errors during dependency injection
/// 依赖注入错误
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(String),
}

/// Build the port set for `config`.
pub fn wire_dependencies(config: &AppConfig) -> Result<AppDeps, WiringError> {
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
    let snapshot = Arc::new(FileRegistrationSnapshotRepository::with_defaults(
        config.data_dir.clone(),
    ));

    let deps = match config.service_mode {
        ServiceMode::Simulated => {
            info!(
                latency_ms = config.simulated_latency.as_millis() as u64,
                failure_rate = config.simulated_failure_rate,
                "using simulated membership service"
            );
            let service = Arc::new(SimulatedMembershipService::new(
                config.simulated_latency,
                config.simulated_failure_rate,
                clock.clone(),
            ));
            AppDeps {
                snapshot,
                catalog: service.clone(),
                gateway: service,
                clock,
            }
        }
        ServiceMode::Http => {
            info!(base_url = %config.api_base_url, "using HTTP membership service");
            let catalog = HttpCatalogClient::new(&config.api_base_url, config.catalog_timeout)
                .map_err(|e| WiringError::HttpClientInit(e.to_string()))?;
            let gateway = HttpRegistrationClient::new(&config.api_base_url, config.submit_timeout)
                .map_err(|e| WiringError::HttpClientInit(e.to_string()))?;
            AppDeps {
                snapshot,
                catalog: Arc::new(catalog),
                gateway: Arc::new(gateway),
                clock,
            }
        }
    };
    Ok(deps)
}

/// Wire dependencies and build the application.
pub fn build_app(config: &AppConfig) -> Result<App, WiringError> {
    let deps = wire_dependencies(config)?;
    Ok(App::new(deps, AppSettings::from(config)))
}
