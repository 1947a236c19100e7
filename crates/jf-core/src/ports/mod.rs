//! Port interfaces for the application layer
//!
//! Ports define the contract between the wizard use cases and the
//! infrastructure adapters (file storage, HTTP endpoints, clock).

mod catalog;
mod clock;
pub mod errors;
mod registration_gateway;
mod snapshot;

pub use catalog::CatalogPort;
pub use clock::ClockPort;
pub use errors::GatewayError;
pub use registration_gateway::RegistrationGatewayPort;
pub use snapshot::RegistrationSnapshotPort;
