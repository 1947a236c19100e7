//! Step controllers.
//!
//! One controller per wizard step. Each owns an edit buffer seeded from the
//! store, gates "continue" on validity and writes back on submit.

mod account;
mod address;
mod form;
mod health;
mod payment;
mod personal;
mod plan;
mod review;

pub use account::AccountStep;
pub use address::AddressStep;
pub use form::StepForm;
pub use health::HealthStep;
pub use payment::{format_card_number, format_cvv, format_expiry, PaymentStep};
pub use personal::PersonalStep;
pub use plan::PlanStep;
pub use review::ReviewStep;

use jf_core::registration::{RegistrationCommand, RegistrationState, Step};
use jf_core::validation::{FieldErrors, StepSchema};
use tracing::{debug, info};

use crate::usecases::catalog::CatalogError;
use crate::usecases::registration::RegistrationStore;

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("{} field(s) need attention", .0.len())]
    Invalid(FieldErrors),
    #[error("{expected:?} step is not active (current: {actual:?})")]
    NotActive { expected: Step, actual: Step },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
}

pub(crate) async fn ensure_active(
    store: &RegistrationStore,
    expected: Step,
) -> Result<(), StepError> {
    let actual = store.step().await;
    if actual == expected {
        Ok(())
    } else {
        debug!(?expected, ?actual, "step controller used off its step");
        Err(StepError::NotActive { expected, actual })
    }
}

/// Write a valid buffer back to the store, then move to the next step.
pub(crate) async fn submit_form<S>(
    store: &RegistrationStore,
    step: Step,
    form: &mut StepForm<S>,
    command: impl FnOnce(S::Input) -> RegistrationCommand,
) -> Result<RegistrationState, StepError>
where
    S: StepSchema,
    S::Input: Clone,
{
    ensure_active(store, step).await?;
    if !form.can_continue() {
        form.touch_all();
        info!(
            step = step.label(),
            errors = form.all_errors().len(),
            "step submit blocked by validation"
        );
        return Err(StepError::Invalid(form.all_errors().clone()));
    }

    store.dispatch(command(form.values().clone())).await;
    Ok(match step.next() {
        Some(next) => store.dispatch(RegistrationCommand::SetStep(next)).await,
        None => store.state().await,
    })
}
