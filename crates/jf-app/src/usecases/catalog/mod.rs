//! Cached catalog.
//!
//! Wraps [`CatalogPort`] with a freshness window, a retry budget and
//! per-resource serialization so concurrent callers share one request.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info_span, warn, Instrument};

use jf_core::catalog::{HealthCondition, Tier, TierError};
use jf_core::ports::CatalogPort;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to load {resource}: {source}")]
    Unavailable {
        resource: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("tier '{id}' violates the catalog contract: {source}")]
    InvalidTier {
        id: String,
        #[source]
        source: TierError,
    },
}

struct Cached<T> {
    value: T,
    fetched_at: Instant,
}

pub struct CachedCatalog {
    port: Arc<dyn CatalogPort>,
    freshness: Duration,
    retry_budget: u32,
    tiers: Mutex<Option<Cached<Vec<Tier>>>>,
    health_conditions: Mutex<Option<Cached<Vec<HealthCondition>>>>,
}

impl CachedCatalog {
    pub fn new(port: Arc<dyn CatalogPort>, freshness: Duration, retry_budget: u32) -> Self {
        Self {
            port,
            freshness,
            retry_budget,
            tiers: Mutex::new(None),
            health_conditions: Mutex::new(None),
        }
    }

    /// Membership tiers. Every entry satisfies the tier contract.
    pub async fn tiers(&self) -> Result<Vec<Tier>, CatalogError> {
        let mut slot = self.tiers.lock().await;
        if let Some(value) = self.fresh(&slot) {
            return Ok(value);
        }

        let tiers = self
            .fetch_with_retry("tiers", || self.port.fetch_tiers())
            .await?;
        for tier in &tiers {
            tier.validate().map_err(|source| CatalogError::InvalidTier {
                id: tier.id.clone(),
                source,
            })?;
        }

        *slot = Some(Cached {
            value: tiers.clone(),
            fetched_at: Instant::now(),
        });
        Ok(tiers)
    }

    pub async fn health_conditions(&self) -> Result<Vec<HealthCondition>, CatalogError> {
        let mut slot = self.health_conditions.lock().await;
        if let Some(value) = self.fresh(&slot) {
            return Ok(value);
        }

        let conditions = self
            .fetch_with_retry("health conditions", || self.port.fetch_health_conditions())
            .await?;

        *slot = Some(Cached {
            value: conditions.clone(),
            fetched_at: Instant::now(),
        });
        Ok(conditions)
    }

    /// Drop cached data so the next call refetches.
    pub async fn invalidate(&self) {
        *self.tiers.lock().await = None;
        *self.health_conditions.lock().await = None;
    }

    fn fresh<T: Clone>(&self, slot: &Option<Cached<T>>) -> Option<T> {
        slot.as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < self.freshness)
            .map(|cached| cached.value.clone())
    }

    async fn fetch_with_retry<T, F, Fut>(
        &self,
        resource: &'static str,
        fetch: F,
    ) -> Result<T, CatalogError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = anyhow::Result<T>>,
    {
        let span = info_span!("usecase.cached_catalog.fetch", resource);
        async {
            let attempts = self.retry_budget.saturating_add(1);
            let mut attempt = 1;
            loop {
                match fetch().await {
                    Ok(value) => {
                        debug!(attempt, "catalog fetch succeeded");
                        return Ok(value);
                    }
                    Err(err) if attempt < attempts => {
                        warn!(attempt, error = %err, "catalog fetch failed, retrying");
                        attempt += 1;
                    }
                    Err(err) => {
                        warn!(attempt, error = %err, "catalog fetch failed, giving up");
                        return Err(CatalogError::Unavailable {
                            resource,
                            source: err,
                        });
                    }
                }
            }
        }
        .instrument(span)
        .await
    }
}
