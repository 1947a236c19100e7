use thiserror::Error;

/// Message shown when the endpoint rejects without an `error` field.
pub const GENERIC_REJECTION_MESSAGE: &str = "Something went wrong";
/// Message shown when no usable response arrived.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to create account. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Non-2xx response; `message` is the body's `error` string or the
    /// generic fallback.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Build a rejection from the body's optional `error` field.
    pub fn rejected(status: u16, error: Option<String>) -> Self {
        let message = error
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| GENERIC_REJECTION_MESSAGE.to_string());
        GatewayError::Rejected { status, message }
    }

    /// Text shown to the user on the review step.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Rejected { message, .. } => message.clone(),
            GatewayError::Transport(_) | GatewayError::InvalidResponse(_) => {
                TRANSPORT_FAILURE_MESSAGE.to_string()
            }
        }
    }
}
