use std::sync::Arc;

use jf_core::ports::ClockPort;
use jf_core::registration::{AddressPatch, RegistrationCommand, RegistrationState, Step};
use jf_core::validation::{AddressSchema, Field, ValidationContext};

use super::{submit_form, StepError, StepForm};
use crate::usecases::registration::RegistrationStore;

/// Step 4: postal address.
pub struct AddressStep {
    store: Arc<RegistrationStore>,
    form: StepForm<AddressSchema>,
}

impl AddressStep {
    pub const STEP: Step = Step::Address;

    pub async fn open(store: Arc<RegistrationStore>, clock: &dyn ClockPort) -> Self {
        let address = store.data().await.address;
        let form = StepForm::new(address, ValidationContext::new(clock.today()));
        Self { store, form }
    }

    pub fn form(&self) -> &StepForm<AddressSchema> {
        &self.form
    }

    pub fn set_street(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.form.edit(Field::Street, |a| a.street = value);
    }

    /// Optional; blank clears it.
    pub fn set_apt(&mut self, value: impl Into<String>) {
        let value = value.into();
        let apt = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
        self.form.update(|a| a.apt = apt);
    }

    pub fn set_city(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.form.edit(Field::City, |a| a.city = value);
    }

    pub fn set_state(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.form.edit(Field::State, |a| a.state = value);
    }

    pub fn set_zip(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.form.edit(Field::Zip, |a| a.zip = value);
    }

    pub fn can_continue(&self) -> bool {
        self.form.can_continue()
    }

    pub async fn submit(&mut self) -> Result<RegistrationState, StepError> {
        submit_form(&self.store, Self::STEP, &mut self.form, |address| {
            RegistrationCommand::UpdateAddress(AddressPatch::from(address))
        })
        .await
    }
}
