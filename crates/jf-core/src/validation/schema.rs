//! Step schemas and the composite registration schema.
//!
//! A step schema validates every field of one wizard step and reports the
//! current error of each failing field. The composite schema runs on the
//! final payload and matches raw values: names need two characters, the
//! phone must be digits with an optional leading `+`, and the card number
//! must be 15 or 16 digits.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::registration::{AccountInfo, AddressInfo, LegalConsent, PaymentInfo, PersonalInfo};
use crate::submission::RegistrationPayload;
use crate::validation::error::{check, Field, FieldErrors, ValidationError};
use crate::validation::rules;

/// Inputs a schema needs besides the values themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    pub today: NaiveDate,
}

impl ValidationContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

pub trait StepSchema {
    type Input;

    /// Current error per failing field; empty when the input is valid.
    fn validate(input: &Self::Input, ctx: &ValidationContext) -> FieldErrors;

    fn is_valid(input: &Self::Input, ctx: &ValidationContext) -> bool {
        Self::validate(input, ctx).is_empty()
    }
}

pub struct AccountSchema;

impl StepSchema for AccountSchema {
    type Input = AccountInfo;

    fn validate(input: &AccountInfo, _ctx: &ValidationContext) -> FieldErrors {
        let mut errors = FieldErrors::new();
        check(&mut errors, Field::Email, rules::email(&input.email));
        check(
            &mut errors,
            Field::Password,
            rules::password(input.password.expose()),
        );
        check(
            &mut errors,
            Field::ConfirmPassword,
            rules::confirm_password(input.confirm_password.expose(), input.password.expose()),
        );
        errors
    }
}

pub struct PersonalSchema;

impl StepSchema for PersonalSchema {
    type Input = PersonalInfo;

    fn validate(input: &PersonalInfo, ctx: &ValidationContext) -> FieldErrors {
        let mut errors = FieldErrors::new();
        check(
            &mut errors,
            Field::FirstName,
            rules::required(&input.first_name, "First name"),
        );
        check(
            &mut errors,
            Field::LastName,
            rules::required(&input.last_name, "Last name"),
        );
        check(&mut errors, Field::Phone, rules::phone(&input.phone));
        check(
            &mut errors,
            Field::DateOfBirth,
            rules::date_of_birth(&input.date_of_birth, ctx.today),
        );
        errors
    }
}

pub struct AddressSchema;

impl StepSchema for AddressSchema {
    type Input = AddressInfo;

    fn validate(input: &AddressInfo, _ctx: &ValidationContext) -> FieldErrors {
        let mut errors = FieldErrors::new();
        check(&mut errors, Field::Street, rules::street(&input.street));
        check(&mut errors, Field::City, rules::city(&input.city));
        check(&mut errors, Field::State, rules::state(&input.state));
        check(&mut errors, Field::Zip, rules::zip(&input.zip));
        errors
    }
}

pub struct HealthSchema;

impl StepSchema for HealthSchema {
    type Input = Vec<String>;

    fn validate(input: &Vec<String>, _ctx: &ValidationContext) -> FieldErrors {
        let mut errors = FieldErrors::new();
        check(
            &mut errors,
            Field::HealthConditions,
            rules::health_selection(input),
        );
        errors
    }
}

pub struct PaymentSchema;

impl StepSchema for PaymentSchema {
    type Input = PaymentInfo;

    fn validate(input: &PaymentInfo, ctx: &ValidationContext) -> FieldErrors {
        let mut errors = FieldErrors::new();
        check(
            &mut errors,
            Field::CardNumber,
            rules::card_number(&input.card_number),
        );
        check(
            &mut errors,
            Field::Expiry,
            rules::expiry(&input.expiry, ctx.today),
        );
        check(&mut errors, Field::Cvv, rules::cvv(&input.cvv));
        check(
            &mut errors,
            Field::BillingZip,
            rules::billing_zip(&input.billing_zip),
        );
        errors
    }
}

pub struct LegalSchema;

impl StepSchema for LegalSchema {
    type Input = LegalConsent;

    fn validate(input: &LegalConsent, _ctx: &ValidationContext) -> FieldErrors {
        let mut errors = FieldErrors::new();
        check(
            &mut errors,
            Field::AgreeTerms,
            rules::agree_terms(input.agree_terms),
        );
        check(
            &mut errors,
            Field::AgreeWaiver,
            rules::agree_waiver(input.agree_waiver),
        );
        errors
    }
}

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?\d{10,15}$").expect("phone pattern is valid"));
static CARD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{15,16}$").expect("card pattern is valid"));
static EXPIRY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}/\d{2}$").expect("expiry pattern is valid"));
static CVV_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3,4}$").expect("cvv pattern is valid"));
static ZIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").expect("zip pattern is valid"));

fn matches(re: &Regex, value: &str, err: ValidationError) -> Result<(), ValidationError> {
    if re.is_match(value) {
        Ok(())
    } else {
        Err(err)
    }
}

fn min_chars(value: &str, min: usize, err: ValidationError) -> Result<(), ValidationError> {
    if value.chars().count() < min {
        Err(err)
    } else {
        Ok(())
    }
}

/// Composite contract for the final submission.
pub struct RegistrationSchema;

impl StepSchema for RegistrationSchema {
    type Input = RegistrationPayload;

    fn validate(input: &RegistrationPayload, ctx: &ValidationContext) -> FieldErrors {
        let mut errors = FieldErrors::new();

        let tier = match &input.selected_tier {
            None => Err(ValidationError::TierMissing),
            Some(tier) => tier.validate().map_err(ValidationError::TierInvalid),
        };
        check(&mut errors, Field::SelectedTier, tier);

        errors.extend(AccountSchema::validate(&input.account, ctx));

        let personal = &input.personal;
        check(
            &mut errors,
            Field::FirstName,
            min_chars(
                &personal.first_name,
                2,
                ValidationError::TooShort {
                    label: "First name",
                    min: 2,
                },
            ),
        );
        check(
            &mut errors,
            Field::LastName,
            min_chars(
                &personal.last_name,
                2,
                ValidationError::TooShort {
                    label: "Last name",
                    min: 2,
                },
            ),
        );
        check(
            &mut errors,
            Field::Phone,
            matches(&PHONE_RE, &personal.phone, ValidationError::PhoneInvalid),
        );
        check(
            &mut errors,
            Field::DateOfBirth,
            rules::date_of_birth(&personal.date_of_birth, ctx.today),
        );

        let address = &input.address;
        check(
            &mut errors,
            Field::Street,
            min_chars(&address.street, 5, ValidationError::StreetTooShort),
        );
        check(
            &mut errors,
            Field::City,
            min_chars(&address.city, 2, ValidationError::Required { label: "City" }),
        );
        check(
            &mut errors,
            Field::State,
            min_chars(&address.state, 2, ValidationError::Required { label: "State" }),
        );
        check(
            &mut errors,
            Field::Zip,
            matches(&ZIP_RE, &address.zip, ValidationError::ZipInvalid),
        );

        let payment = &input.payment;
        check(
            &mut errors,
            Field::CardNumber,
            matches(
                &CARD_RE,
                &payment.card_number,
                ValidationError::CardNumberInvalid,
            ),
        );
        check(
            &mut errors,
            Field::Expiry,
            matches(&EXPIRY_RE, &payment.expiry, ValidationError::ExpiryFormat),
        );
        check(
            &mut errors,
            Field::Cvv,
            matches(&CVV_RE, &payment.cvv, ValidationError::CvvInvalid),
        );
        check(
            &mut errors,
            Field::BillingZip,
            matches(&ZIP_RE, &payment.billing_zip, ValidationError::ZipInvalid),
        );

        errors.extend(LegalSchema::validate(&input.legal, ctx));
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BillingPeriod, Tier};
    use crate::registration::RegistrationData;
    use crate::security::SecretText;

    fn ctx() -> ValidationContext {
        ValidationContext::new(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    fn complete_data() -> RegistrationData {
        RegistrationData {
            selected_tier: Some(Tier {
                id: "gold".into(),
                name: "Gold".into(),
                price: 49.0,
                billing_period: BillingPeriod::Month,
                features: vec!["Classes".into()],
                access_hours: Some("24/7".into()),
            }),
            account: AccountInfo {
                email: "ada@example.com".into(),
                password: SecretText::new("Sup3rSecret"),
                confirm_password: SecretText::new("Sup3rSecret"),
            },
            personal: PersonalInfo {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                phone: "+61412345678".into(),
                date_of_birth: "1990-12-10".into(),
            },
            address: AddressInfo {
                street: "12 Analytical Way".into(),
                apt: None,
                city: "Sydney".into(),
                state: "NSW".into(),
                zip: "2000".into(),
            },
            health_conditions: vec!["none".into()],
            requires_medical_clearance: false,
            payment: PaymentInfo {
                card_number: "4242 4242 4242 4242".into(),
                expiry: "12/30".into(),
                cvv: "123".into(),
                billing_zip: "2000".into(),
            },
            legal: LegalConsent {
                agree_terms: true,
                agree_waiver: true,
                marketing_opt_in: false,
            },
        }
    }

    #[test]
    fn step_schemas_accept_complete_data() {
        let data = complete_data();
        let ctx = ctx();
        assert!(AccountSchema::is_valid(&data.account, &ctx));
        assert!(PersonalSchema::is_valid(&data.personal, &ctx));
        assert!(AddressSchema::is_valid(&data.address, &ctx));
        assert!(HealthSchema::is_valid(&data.health_conditions, &ctx));
        assert!(PaymentSchema::is_valid(&data.payment, &ctx));
        assert!(LegalSchema::is_valid(&data.legal, &ctx));
        assert!(RegistrationSchema::is_valid(
            &RegistrationPayload::from_data(&data),
            &ctx
        ));
    }

    #[test]
    fn empty_account_reports_every_field() {
        let errors = AccountSchema::validate(&AccountInfo::default(), &ctx());
        assert_eq!(
            errors.keys().copied().collect::<Vec<_>>(),
            vec![Field::Email, Field::Password, Field::ConfirmPassword]
        );
    }

    #[test]
    fn single_letter_name_passes_step_but_fails_composite() {
        let mut data = complete_data();
        data.personal.first_name = "A".into();

        assert!(PersonalSchema::is_valid(&data.personal, &ctx()));

        let errors = RegistrationSchema::validate(&RegistrationPayload::from_data(&data), &ctx());
        assert_eq!(
            errors.get(&Field::FirstName),
            Some(&ValidationError::TooShort {
                label: "First name",
                min: 2
            })
        );
    }

    #[test]
    fn formatted_phone_passes_step_but_fails_composite() {
        let mut data = complete_data();
        data.personal.phone = "+61 412 345 678".into();

        assert!(PersonalSchema::is_valid(&data.personal, &ctx()));

        let errors = RegistrationSchema::validate(&RegistrationPayload::from_data(&data), &ctx());
        assert_eq!(errors.get(&Field::Phone), Some(&ValidationError::PhoneInvalid));
    }

    #[test]
    fn thirteen_digit_card_passes_step_but_fails_composite() {
        let mut data = complete_data();
        data.payment.card_number = "4222 2222 2222 2".into();

        assert!(PaymentSchema::is_valid(&data.payment, &ctx()));

        let errors = RegistrationSchema::validate(&RegistrationPayload::from_data(&data), &ctx());
        assert_eq!(
            errors.get(&Field::CardNumber),
            Some(&ValidationError::CardNumberInvalid)
        );
    }

    #[test]
    fn composite_requires_tier_and_consent() {
        let mut data = complete_data();
        data.selected_tier = None;
        data.legal.agree_waiver = false;

        let errors = RegistrationSchema::validate(&RegistrationPayload::from_data(&data), &ctx());
        assert_eq!(
            errors.get(&Field::SelectedTier),
            Some(&ValidationError::TierMissing)
        );
        assert_eq!(
            errors.get(&Field::AgreeWaiver),
            Some(&ValidationError::WaiverNotAccepted)
        );
    }
}
