use std::sync::Arc;

use jf_core::ports::ClockPort;
use jf_core::registration::{PaymentPatch, RegistrationCommand, RegistrationState, Step};
use jf_core::validation::{Field, PaymentSchema, ValidationContext};

use super::{submit_form, StepError, StepForm};
use crate::usecases::registration::RegistrationStore;

const MAX_CARD_DIGITS: usize = 19;
const MAX_CARD_DISPLAY_LEN: usize = 19;
const MAX_EXPIRY_DIGITS: usize = 4;
const MAX_CVV_DIGITS: usize = 4;

fn digits(input: &str, max: usize) -> String {
    input.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// Digits grouped by four, display capped at 19 characters.
pub fn format_card_number(input: &str) -> String {
    let digits = digits(input, MAX_CARD_DIGITS);
    let mut formatted = String::with_capacity(MAX_CARD_DISPLAY_LEN);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            formatted.push(' ');
        }
        formatted.push(digit);
    }
    formatted.truncate(MAX_CARD_DISPLAY_LEN);
    formatted
}

/// `MMYY` digits with a `/` once the year starts.
pub fn format_expiry(input: &str) -> String {
    let digits = digits(input, MAX_EXPIRY_DIGITS);
    if digits.len() >= 3 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

pub fn format_cvv(input: &str) -> String {
    digits(input, MAX_CVV_DIGITS)
}

/// Step 6: card details.
pub struct PaymentStep {
    store: Arc<RegistrationStore>,
    form: StepForm<PaymentSchema>,
}

impl PaymentStep {
    pub const STEP: Step = Step::Payment;

    pub async fn open(store: Arc<RegistrationStore>, clock: &dyn ClockPort) -> Self {
        let payment = store.data().await.payment;
        let form = StepForm::new(payment, ValidationContext::new(clock.today()));
        Self { store, form }
    }

    pub fn form(&self) -> &StepForm<PaymentSchema> {
        &self.form
    }

    pub fn set_card_number(&mut self, input: &str) {
        let value = format_card_number(input);
        self.form.edit(Field::CardNumber, |p| p.card_number = value);
    }

    pub fn set_expiry(&mut self, input: &str) {
        let value = format_expiry(input);
        self.form.edit(Field::Expiry, |p| p.expiry = value);
    }

    pub fn set_cvv(&mut self, input: &str) {
        let value = format_cvv(input);
        self.form.edit(Field::Cvv, |p| p.cvv = value);
    }

    pub fn set_billing_zip(&mut self, input: &str) {
        let value = input.to_string();
        self.form.edit(Field::BillingZip, |p| p.billing_zip = value);
    }

    pub fn can_continue(&self) -> bool {
        self.form.can_continue()
    }

    pub async fn submit(&mut self) -> Result<RegistrationState, StepError> {
        submit_form(&self.store, Self::STEP, &mut self.form, |payment| {
            RegistrationCommand::UpdatePayment(PaymentPatch::from(payment))
        })
        .await
    }
}
