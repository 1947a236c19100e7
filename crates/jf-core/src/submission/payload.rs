//! Composite registration payload sent to `POST /register`.

use serde::{Deserialize, Serialize};

use crate::catalog::Tier;
use crate::registration::{
    AccountInfo, AddressInfo, LegalConsent, PaymentInfo, PersonalInfo, RegistrationData,
};

/// Wire body of the registration request.
///
/// Mirrors [`RegistrationData`] minus the derived clearance flag, with the
/// card number reduced to raw digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    pub selected_tier: Option<Tier>,
    pub account: AccountInfo,
    pub personal: PersonalInfo,
    pub address: AddressInfo,
    pub health_conditions: Vec<String>,
    pub payment: PaymentInfo,
    pub legal: LegalConsent,
}

impl RegistrationPayload {
    pub fn from_data(data: &RegistrationData) -> Self {
        let payment = PaymentInfo {
            card_number: data.payment.raw_card_number(),
            ..data.payment.clone()
        };
        Self {
            selected_tier: data.selected_tier.clone(),
            account: data.account.clone(),
            personal: data.personal.clone(),
            address: data.address.clone(),
            health_conditions: data.health_conditions.clone(),
            payment,
            legal: data.legal,
        }
    }
}
