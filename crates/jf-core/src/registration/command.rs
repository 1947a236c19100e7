//! Commands accepted by the registration reducer.

use crate::catalog::Tier;
use crate::registration::model::{
    AccountInfo, AddressInfo, LegalConsent, PaymentInfo, PersonalInfo, RegistrationData, Step,
};
use crate::security::SecretText;

/// Closed set of state updates.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationCommand {
    /// Move to an adjacent step.
    SetStep(Step),
    /// Pick a membership plan; also moves to [`Step::Account`].
    SetTier(Tier),
    UpdateAccount(AccountPatch),
    UpdatePersonal(PersonalPatch),
    UpdateAddress(AddressPatch),
    /// Replace the health selection and recompute the clearance flag.
    SetHealthConditions(Vec<String>),
    UpdatePayment(PaymentPatch),
    UpdateLegal(LegalPatch),
    /// Back to an empty wizard on the first step.
    Reset,
    /// Replace every data field with a restored snapshot, keeping the step.
    LoadPersisted(RegistrationData),
}

impl RegistrationCommand {
    pub fn name(&self) -> &'static str {
        match self {
            RegistrationCommand::SetStep(_) => "SetStep",
            RegistrationCommand::SetTier(_) => "SetTier",
            RegistrationCommand::UpdateAccount(_) => "UpdateAccount",
            RegistrationCommand::UpdatePersonal(_) => "UpdatePersonal",
            RegistrationCommand::UpdateAddress(_) => "UpdateAddress",
            RegistrationCommand::SetHealthConditions(_) => "SetHealthConditions",
            RegistrationCommand::UpdatePayment(_) => "UpdatePayment",
            RegistrationCommand::UpdateLegal(_) => "UpdateLegal",
            RegistrationCommand::Reset => "Reset",
            RegistrationCommand::LoadPersisted(_) => "LoadPersisted",
        }
    }
}

fn merge<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountPatch {
    pub email: Option<String>,
    pub password: Option<SecretText>,
    pub confirm_password: Option<SecretText>,
}

impl AccountPatch {
    pub fn apply_to(self, account: &mut AccountInfo) {
        merge(&mut account.email, self.email);
        merge(&mut account.password, self.password);
        merge(&mut account.confirm_password, self.confirm_password);
    }
}

impl From<AccountInfo> for AccountPatch {
    fn from(account: AccountInfo) -> Self {
        Self {
            email: Some(account.email),
            password: Some(account.password),
            confirm_password: Some(account.confirm_password),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonalPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
}

impl PersonalPatch {
    pub fn apply_to(self, personal: &mut PersonalInfo) {
        merge(&mut personal.first_name, self.first_name);
        merge(&mut personal.last_name, self.last_name);
        merge(&mut personal.phone, self.phone);
        merge(&mut personal.date_of_birth, self.date_of_birth);
    }
}

impl From<PersonalInfo> for PersonalPatch {
    fn from(personal: PersonalInfo) -> Self {
        Self {
            first_name: Some(personal.first_name),
            last_name: Some(personal.last_name),
            phone: Some(personal.phone),
            date_of_birth: Some(personal.date_of_birth),
        }
    }
}

/// `apt` is doubly optional: `Some(None)` clears the apartment line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressPatch {
    pub street: Option<String>,
    pub apt: Option<Option<String>>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

impl AddressPatch {
    pub fn apply_to(self, address: &mut AddressInfo) {
        merge(&mut address.street, self.street);
        merge(&mut address.apt, self.apt);
        merge(&mut address.city, self.city);
        merge(&mut address.state, self.state);
        merge(&mut address.zip, self.zip);
    }
}

impl From<AddressInfo> for AddressPatch {
    fn from(address: AddressInfo) -> Self {
        Self {
            street: Some(address.street),
            apt: Some(address.apt),
            city: Some(address.city),
            state: Some(address.state),
            zip: Some(address.zip),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentPatch {
    pub card_number: Option<String>,
    pub expiry: Option<String>,
    pub cvv: Option<String>,
    pub billing_zip: Option<String>,
}

impl PaymentPatch {
    pub fn apply_to(self, payment: &mut PaymentInfo) {
        merge(&mut payment.card_number, self.card_number);
        merge(&mut payment.expiry, self.expiry);
        merge(&mut payment.cvv, self.cvv);
        merge(&mut payment.billing_zip, self.billing_zip);
    }
}

impl From<PaymentInfo> for PaymentPatch {
    fn from(payment: PaymentInfo) -> Self {
        Self {
            card_number: Some(payment.card_number),
            expiry: Some(payment.expiry),
            cvv: Some(payment.cvv),
            billing_zip: Some(payment.billing_zip),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LegalPatch {
    pub agree_terms: Option<bool>,
    pub agree_waiver: Option<bool>,
    pub marketing_opt_in: Option<bool>,
}

impl LegalPatch {
    pub fn apply_to(self, legal: &mut LegalConsent) {
        merge(&mut legal.agree_terms, self.agree_terms);
        merge(&mut legal.agree_waiver, self.agree_waiver);
        merge(&mut legal.marketing_opt_in, self.marketing_opt_in);
    }
}

impl From<LegalConsent> for LegalPatch {
    fn from(legal: LegalConsent) -> Self {
        Self {
            agree_terms: Some(legal.agree_terms),
            agree_waiver: Some(legal.agree_waiver),
            marketing_opt_in: Some(legal.marketing_opt_in),
        }
    }
}
