//! Wizard application: shared store plus step controller factories.

use std::sync::Arc;
use std::time::Duration;

use jf_core::config::AppConfig;
use jf_core::ports::ClockPort;

use crate::deps::AppDeps;
use crate::usecases::steps::{
    AccountStep, AddressStep, HealthStep, PaymentStep, PersonalStep, PlanStep, ReviewStep,
};
use crate::usecases::{CachedCatalog, RegistrationStore, SubmitRegistration};

/// Tunables taken from [`AppConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppSettings {
    pub submit_timeout: Duration,
    pub catalog_freshness: Duration,
    pub catalog_retry_budget: u32,
}

impl From<&AppConfig> for AppSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            submit_timeout: config.submit_timeout,
            catalog_freshness: config.catalog_freshness,
            catalog_retry_budget: config.catalog_retry_budget,
        }
    }
}

pub struct App {
    store: Arc<RegistrationStore>,
    catalog: Arc<CachedCatalog>,
    submit: Arc<SubmitRegistration>,
    clock: Arc<dyn ClockPort>,
}

impl App {
    pub fn new(deps: AppDeps, settings: AppSettings) -> Self {
        let store = Arc::new(RegistrationStore::new(deps.snapshot));
        let catalog = Arc::new(CachedCatalog::new(
            deps.catalog,
            settings.catalog_freshness,
            settings.catalog_retry_budget,
        ));
        let submit = Arc::new(SubmitRegistration::new(
            store.clone(),
            deps.gateway,
            deps.clock.clone(),
            settings.submit_timeout,
        ));
        Self {
            store,
            catalog,
            submit,
            clock: deps.clock,
        }
    }

    pub fn store(&self) -> Arc<RegistrationStore> {
        self.store.clone()
    }

    pub fn catalog(&self) -> Arc<CachedCatalog> {
        self.catalog.clone()
    }

    pub fn plan_step(&self) -> PlanStep {
        PlanStep::new(self.store.clone(), self.catalog.clone())
    }

    pub async fn account_step(&self) -> AccountStep {
        AccountStep::open(self.store.clone(), self.clock.as_ref()).await
    }

    pub async fn personal_step(&self) -> PersonalStep {
        PersonalStep::open(self.store.clone(), self.clock.as_ref()).await
    }

    pub async fn address_step(&self) -> AddressStep {
        AddressStep::open(self.store.clone(), self.clock.as_ref()).await
    }

    pub async fn health_step(&self) -> HealthStep {
        HealthStep::open(self.store.clone(), self.catalog.clone(), self.clock.as_ref()).await
    }

    pub async fn payment_step(&self) -> PaymentStep {
        PaymentStep::open(self.store.clone(), self.clock.as_ref()).await
    }

    pub fn review_step(&self) -> ReviewStep {
        ReviewStep::new(self.store.clone(), self.submit.clone())
    }
}
