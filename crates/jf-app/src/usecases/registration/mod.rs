mod store;

pub use store::RegistrationStore;
