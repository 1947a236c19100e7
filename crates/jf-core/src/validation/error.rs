use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::TierError;

/// Every validated field of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    SelectedTier,
    Email,
    Password,
    ConfirmPassword,
    FirstName,
    LastName,
    Phone,
    DateOfBirth,
    Street,
    City,
    State,
    Zip,
    HealthConditions,
    CardNumber,
    Expiry,
    Cvv,
    BillingZip,
    AgreeTerms,
    AgreeWaiver,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::SelectedTier => "Membership plan",
            Field::Email => "Email",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm password",
            Field::FirstName => "First name",
            Field::LastName => "Last name",
            Field::Phone => "Phone number",
            Field::DateOfBirth => "Date of birth",
            Field::Street => "Street address",
            Field::City => "City",
            Field::State => "State",
            Field::Zip => "ZIP code",
            Field::HealthConditions => "Health conditions",
            Field::CardNumber => "Card number",
            Field::Expiry => "Expiry",
            Field::Cvv => "CVV",
            Field::BillingZip => "Billing ZIP",
            Field::AgreeTerms => "Terms of Service",
            Field::AgreeWaiver => "Liability Waiver",
        }
    }
}

/// A failed field rule. `Display` is the message shown next to the field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{label} is required")]
    Required { label: &'static str },
    #[error("{label} must be at least {min} characters")]
    TooShort { label: &'static str, min: usize },

    #[error("Invalid email address")]
    EmailInvalid,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Password must contain at least one uppercase letter")]
    PasswordMissingUppercase,
    #[error("Password must contain at least one number")]
    PasswordMissingDigit,
    #[error("Please confirm your password")]
    ConfirmPasswordRequired,
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid phone (10-15 digits, optional +)")]
    PhoneInvalid,
    #[error("Invalid date of birth")]
    DateOfBirthInvalid,
    #[error("You must be 16 or older")]
    AgeOutOfRange,

    #[error("Street address is required (min 5 characters)")]
    StreetTooShort,
    #[error("Invalid ZIP code")]
    ZipInvalid,

    #[error("Please select at least one option")]
    NoHealthSelection,

    #[error("Invalid card length")]
    CardLengthInvalid,
    #[error("Invalid card number")]
    CardNumberInvalid,
    #[error("Invalid expiry date")]
    ExpiryInvalid,
    #[error("Format: MM/YY")]
    ExpiryFormat,
    #[error("Card is expired")]
    CardExpired,
    #[error("Invalid CVV")]
    CvvInvalid,

    #[error("You must agree to the terms")]
    TermsNotAccepted,
    #[error("You must agree to the waiver")]
    WaiverNotAccepted,

    #[error("Please choose a membership plan")]
    TierMissing,
    #[error("Invalid membership plan: {0}")]
    TierInvalid(TierError),
}

/// Current error per field; a field without an entry is valid.
pub type FieldErrors = BTreeMap<Field, ValidationError>;

/// Record the outcome of a rule for `field`.
pub(crate) fn check(errors: &mut FieldErrors, field: Field, result: Result<(), ValidationError>) {
    if let Err(err) = result {
        errors.insert(field, err);
    }
}
