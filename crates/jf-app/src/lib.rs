//! joinflow application layer
//!
//! Use cases driving the sign-up wizard: the registration store, the seven
//! step controllers, the cached catalog and the submission use case.

pub mod app;
pub mod deps;
pub mod usecases;

pub use app::{App, AppSettings};
pub use deps::AppDeps;
