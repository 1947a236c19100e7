//! # jf-infra
//!
//! Adapters implementing the `jf-core` ports: file snapshot storage, HTTP
//! clients, the simulated membership service and the system clock.

pub mod http;
pub mod registration;
pub mod simulated;
pub mod time;

pub use http::{HttpCatalogClient, HttpRegistrationClient};
pub use registration::FileRegistrationSnapshotRepository;
pub use simulated::SimulatedMembershipService;
pub use time::SystemClock;
