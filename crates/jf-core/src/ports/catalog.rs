use async_trait::async_trait;

use crate::catalog::{HealthCondition, Tier};

/// Read-only catalog endpoints.
#[async_trait]
pub trait CatalogPort: Send + Sync {
    async fn fetch_tiers(&self) -> anyhow::Result<Vec<Tier>>;

    async fn fetch_health_conditions(&self) -> anyhow::Result<Vec<HealthCondition>>;
}
