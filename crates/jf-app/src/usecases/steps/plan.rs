use std::sync::Arc;

use jf_core::catalog::Tier;
use jf_core::registration::{RegistrationCommand, RegistrationState, Step};
use jf_core::validation::{Field, FieldErrors, ValidationError};
use tracing::info;

use super::{ensure_active, StepError};
use crate::usecases::catalog::CachedCatalog;
use crate::usecases::registration::RegistrationStore;

/// Step 1: pick a membership plan.
pub struct PlanStep {
    store: Arc<RegistrationStore>,
    catalog: Arc<CachedCatalog>,
}

impl PlanStep {
    pub const STEP: Step = Step::Plan;

    pub fn new(store: Arc<RegistrationStore>, catalog: Arc<CachedCatalog>) -> Self {
        Self { store, catalog }
    }

    pub async fn tiers(&self) -> Result<Vec<Tier>, StepError> {
        Ok(self.catalog.tiers().await?)
    }

    pub async fn selected(&self) -> Option<Tier> {
        self.store.data().await.selected_tier
    }

    /// Store the tier; the store moves on to the account step.
    pub async fn select(&self, tier: Tier) -> Result<RegistrationState, StepError> {
        ensure_active(&self.store, Self::STEP).await?;
        if let Err(err) = tier.validate() {
            let mut errors = FieldErrors::new();
            errors.insert(Field::SelectedTier, ValidationError::TierInvalid(err));
            return Err(StepError::Invalid(errors));
        }

        info!(tier = %tier.id, "membership tier selected");
        Ok(self.store.dispatch(RegistrationCommand::SetTier(tier)).await)
    }

    /// Select a tier from the catalog by id.
    pub async fn select_by_id(&self, tier_id: &str) -> Result<RegistrationState, StepError> {
        let tier = self
            .tiers()
            .await?
            .into_iter()
            .find(|tier| tier.id == tier_id)
            .ok_or_else(|| StepError::UnknownOption(tier_id.to_string()))?;
        self.select(tier).await
    }
}
