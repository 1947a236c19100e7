//! Field rules and step schemas.

pub mod error;
pub mod luhn;
pub mod rules;
pub mod schema;

pub use error::{Field, FieldErrors, ValidationError};
pub use schema::{
    AccountSchema, AddressSchema, HealthSchema, LegalSchema, PaymentSchema, PersonalSchema,
    RegistrationSchema, StepSchema, ValidationContext,
};
