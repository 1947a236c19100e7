//! Process bootstrap: configuration, tracing and dependency wiring.

pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_config};
pub use self::tracing::init_tracing_subscriber;
pub use wiring::{build_app, wire_dependencies, WiringError};
