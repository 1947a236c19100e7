use async_trait::async_trait;

use super::GatewayError;
use crate::submission::{RegistrationPayload, RegistrationReceipt};

/// The registration endpoint.
#[async_trait]
pub trait RegistrationGatewayPort: Send + Sync {
    async fn register(
        &self,
        payload: &RegistrationPayload,
    ) -> Result<RegistrationReceipt, GatewayError>;
}
