use std::sync::Arc;

use jf_core::catalog::HealthCondition;
use jf_core::ports::ClockPort;
use jf_core::registration::health_selection;
use jf_core::registration::{RegistrationCommand, RegistrationState, Step};
use jf_core::validation::{Field, HealthSchema, ValidationContext};

use super::{submit_form, StepError, StepForm};
use crate::usecases::catalog::CachedCatalog;
use crate::usecases::registration::RegistrationStore;

/// Step 5: health conditions.
pub struct HealthStep {
    store: Arc<RegistrationStore>,
    catalog: Arc<CachedCatalog>,
    form: StepForm<HealthSchema>,
}

impl HealthStep {
    pub const STEP: Step = Step::Health;

    pub async fn open(
        store: Arc<RegistrationStore>,
        catalog: Arc<CachedCatalog>,
        clock: &dyn ClockPort,
    ) -> Self {
        let selection = store.data().await.health_conditions;
        let form = StepForm::new(selection, ValidationContext::new(clock.today()));
        Self {
            store,
            catalog,
            form,
        }
    }

    pub fn form(&self) -> &StepForm<HealthSchema> {
        &self.form
    }

    pub async fn conditions(&self) -> Result<Vec<HealthCondition>, StepError> {
        Ok(self.catalog.health_conditions().await?)
    }

    pub fn selection(&self) -> &[String] {
        self.form.values()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection().iter().any(|selected| selected == id)
    }

    /// Checkbox toggle; `none` is exclusive.
    pub fn toggle(&mut self, id: &str) {
        self.form.edit(Field::HealthConditions, |selection| {
            *selection = health_selection::toggle(selection, id)
        });
    }

    /// Clearance flag the store will derive for the buffered selection.
    pub fn requires_medical_clearance(&self) -> bool {
        health_selection::requires_medical_clearance(self.selection())
    }

    /// Selected conditions the catalog marks as needing clearance.
    pub fn flagged_by_catalog<'a>(
        &self,
        conditions: &'a [HealthCondition],
    ) -> Vec<&'a HealthCondition> {
        conditions
            .iter()
            .filter(|condition| condition.requires_medical_clearance)
            .filter(|condition| self.is_selected(&condition.id))
            .collect()
    }

    pub fn can_continue(&self) -> bool {
        self.form.can_continue()
    }

    pub async fn submit(&mut self) -> Result<RegistrationState, StepError> {
        submit_form(
            &self.store,
            Self::STEP,
            &mut self.form,
            RegistrationCommand::SetHealthConditions,
        )
        .await
    }
}
