use std::sync::Arc;

use jf_core::registration::{LegalConsent, LegalPatch, RegistrationCommand, RegistrationData, Step};
use jf_core::submission::SubmissionState;

use super::{ensure_active, StepError};
use crate::usecases::registration::RegistrationStore;
use crate::usecases::submission::{SubmissionError, SubmitRegistration};

/// Step 7: summary, legal consent and submission.
///
/// Consent flags go straight to the store; there is no edit buffer.
pub struct ReviewStep {
    store: Arc<RegistrationStore>,
    submit: Arc<SubmitRegistration>,
}

impl ReviewStep {
    pub const STEP: Step = Step::Review;

    pub fn new(store: Arc<RegistrationStore>, submit: Arc<SubmitRegistration>) -> Self {
        Self { store, submit }
    }

    pub async fn summary(&self) -> RegistrationData {
        self.store.data().await
    }

    pub async fn set_agree_terms(&self, value: bool) -> Result<LegalConsent, StepError> {
        self.update_legal(LegalPatch {
            agree_terms: Some(value),
            ..Default::default()
        })
        .await
    }

    pub async fn set_agree_waiver(&self, value: bool) -> Result<LegalConsent, StepError> {
        self.update_legal(LegalPatch {
            agree_waiver: Some(value),
            ..Default::default()
        })
        .await
    }

    pub async fn set_marketing_opt_in(&self, value: bool) -> Result<LegalConsent, StepError> {
        self.update_legal(LegalPatch {
            marketing_opt_in: Some(value),
            ..Default::default()
        })
        .await
    }

    /// Submit is enabled only when this holds.
    pub async fn all_agreed(&self) -> bool {
        self.store.data().await.legal.all_agreed()
    }

    pub async fn submission(&self) -> SubmissionState {
        self.submit.state().await
    }

    pub async fn submit(&self) -> Result<SubmissionState, SubmissionError> {
        self.submit.execute().await
    }

    pub fn cancel(&self) -> bool {
        self.submit.cancel()
    }

    async fn update_legal(&self, patch: LegalPatch) -> Result<LegalConsent, StepError> {
        ensure_active(&self.store, Self::STEP).await?;
        let state = self
            .store
            .dispatch(RegistrationCommand::UpdateLegal(patch))
            .await;
        Ok(state.data.legal)
    }
}
