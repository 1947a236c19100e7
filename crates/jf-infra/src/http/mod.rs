//! reqwest adapters for the membership endpoints.

mod catalog_client;
mod registration_client;

use std::time::Duration;

pub use catalog_client::HttpCatalogClient;
pub use registration_client::HttpRegistrationClient;

/// Connect timeout shared by the HTTP adapters.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

fn build_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(timeout)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}
