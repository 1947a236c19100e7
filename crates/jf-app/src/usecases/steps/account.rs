use std::sync::Arc;

use jf_core::ports::ClockPort;
use jf_core::registration::{AccountPatch, RegistrationCommand, RegistrationState, Step};
use jf_core::security::SecretText;
use jf_core::validation::{AccountSchema, Field, ValidationContext};

use super::{submit_form, StepError, StepForm};
use crate::usecases::registration::RegistrationStore;

/// Step 2: credentials.
pub struct AccountStep {
    store: Arc<RegistrationStore>,
    form: StepForm<AccountSchema>,
}

impl AccountStep {
    pub const STEP: Step = Step::Account;

    pub async fn open(store: Arc<RegistrationStore>, clock: &dyn ClockPort) -> Self {
        let account = store.data().await.account;
        let form = StepForm::new(account, ValidationContext::new(clock.today()));
        Self { store, form }
    }

    pub fn form(&self) -> &StepForm<AccountSchema> {
        &self.form
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        let email = email.into();
        self.form.edit(Field::Email, |account| account.email = email);
    }

    pub fn set_password(&mut self, password: impl Into<SecretText>) {
        let password = password.into();
        self.form
            .edit(Field::Password, |account| account.password = password);
    }

    pub fn set_confirm_password(&mut self, confirm: impl Into<SecretText>) {
        let confirm = confirm.into();
        self.form.edit(Field::ConfirmPassword, |account| {
            account.confirm_password = confirm
        });
    }

    pub fn can_continue(&self) -> bool {
        self.form.can_continue()
    }

    pub async fn submit(&mut self) -> Result<RegistrationState, StepError> {
        submit_form(&self.store, Self::STEP, &mut self.form, |account| {
            RegistrationCommand::UpdateAccount(AccountPatch::from(account))
        })
        .await
    }
}
