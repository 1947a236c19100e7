//! Terminal-step submission: payload, receipt and the pure state machine.

pub mod payload;
pub mod receipt;
pub mod state_machine;

pub use payload::RegistrationPayload;
pub use receipt::RegistrationReceipt;
pub use state_machine::{
    SubmissionAction, SubmissionEvent, SubmissionState, SubmissionStateMachine,
};
