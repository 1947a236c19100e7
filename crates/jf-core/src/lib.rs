//! # jf-core
//!
//! Core domain models and business logic for the joinflow sign-up wizard.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

pub mod catalog;
pub mod config;
pub mod ports;
pub mod registration;
pub mod security;
pub mod submission;
pub mod validation;

// Re-export commonly used types at the crate root
pub use catalog::{BillingPeriod, HealthCondition, Tier};
pub use config::{AppConfig, ServiceMode};
pub use registration::{RegistrationCommand, RegistrationData, RegistrationState, Step};
pub use security::SecretText;
pub use submission::{RegistrationPayload, RegistrationReceipt, SubmissionState};
pub use validation::{Field, FieldErrors, ValidationError};
