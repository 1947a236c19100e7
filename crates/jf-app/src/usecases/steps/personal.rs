use std::sync::Arc;

use jf_core::ports::ClockPort;
use jf_core::registration::{PersonalPatch, RegistrationCommand, RegistrationState, Step};
use jf_core::validation::{Field, PersonalSchema, ValidationContext};

use super::{submit_form, StepError, StepForm};
use crate::usecases::registration::RegistrationStore;

/// Step 3: name, phone and date of birth.
pub struct PersonalStep {
    store: Arc<RegistrationStore>,
    form: StepForm<PersonalSchema>,
}

impl PersonalStep {
    pub const STEP: Step = Step::Personal;

    pub async fn open(store: Arc<RegistrationStore>, clock: &dyn ClockPort) -> Self {
        let personal = store.data().await.personal;
        let form = StepForm::new(personal, ValidationContext::new(clock.today()));
        Self { store, form }
    }

    pub fn form(&self) -> &StepForm<PersonalSchema> {
        &self.form
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.form.edit(Field::FirstName, |p| p.first_name = value);
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.form.edit(Field::LastName, |p| p.last_name = value);
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.form.edit(Field::Phone, |p| p.phone = value);
    }

    /// `YYYY-MM-DD`.
    pub fn set_date_of_birth(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.form.edit(Field::DateOfBirth, |p| p.date_of_birth = value);
    }

    pub fn can_continue(&self) -> bool {
        self.form.can_continue()
    }

    pub async fn submit(&mut self) -> Result<RegistrationState, StepError> {
        submit_form(&self.store, Self::STEP, &mut self.form, |personal| {
            RegistrationCommand::UpdatePersonal(PersonalPatch::from(personal))
        })
        .await
    }
}
