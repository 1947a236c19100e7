use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use jf_core::catalog::{HealthCondition, Tier};
use jf_core::ports::CatalogPort;

use super::{build_client, endpoint};

/// `GET {base}/tiers` and `GET {base}/health-conditions`.
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        let url = endpoint(&self.base_url, path);
        debug!(%url, "catalog request");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?
            .error_for_status()
            .with_context(|| format!("GET {url} returned an error status"))?;
        response
            .json::<T>()
            .await
            .with_context(|| format!("GET {url} returned an unexpected body"))
    }
}

#[async_trait]
impl CatalogPort for HttpCatalogClient {
    async fn fetch_tiers(&self) -> anyhow::Result<Vec<Tier>> {
        self.get_json("tiers").await
    }

    async fn fetch_health_conditions(&self) -> anyhow::Result<Vec<HealthCondition>> {
        self.get_json("health-conditions").await
    }
}
