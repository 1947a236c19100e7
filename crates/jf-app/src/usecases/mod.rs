//! Business logic use cases

pub mod catalog;
pub mod registration;
pub mod steps;
pub mod submission;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::{CachedCatalog, CatalogError};
pub use registration::RegistrationStore;
pub use submission::{SubmissionError, SubmitRegistration};
