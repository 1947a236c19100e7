//! Registration domain module.
//!
//! Holds the wizard aggregate, its commands and the pure reducer.

pub mod command;
pub mod health_selection;
pub mod model;
pub mod reducer;

pub use command::{
    AccountPatch, AddressPatch, LegalPatch, PaymentPatch, PersonalPatch, RegistrationCommand,
};
pub use model::{
    AccountInfo, AddressInfo, LegalConsent, PaymentInfo, PersonalInfo, RegistrationData,
    RegistrationState, Step, TOTAL_STEPS,
};
pub use reducer::RegistrationReducer;
