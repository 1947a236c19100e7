//! # Application Dependencies / 应用依赖
//!
//! Parameter grouping for [`crate::App`] construction. Not a builder: every
//! port is required and nothing is defaulted here.

use std::sync::Arc;

use jf_core::ports::{CatalogPort, ClockPort, RegistrationGatewayPort, RegistrationSnapshotPort};

pub struct AppDeps {
    pub snapshot: Arc<dyn RegistrationSnapshotPort>,
    pub catalog: Arc<dyn CatalogPort>,
    pub gateway: Arc<dyn RegistrationGatewayPort>,
    pub clock: Arc<dyn ClockPort>,
}
