use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{error, info, info_span, warn, Instrument};

use jf_core::ports::errors::GatewayError;
use jf_core::ports::RegistrationGatewayPort;
use jf_core::submission::{RegistrationPayload, RegistrationReceipt};

use super::{build_client, endpoint};

/// Error body of a rejected registration. Every field is optional so a
/// malformed body still yields a rejection.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// `POST {base}/register` with the composite payload as JSON.
pub struct HttpRegistrationClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRegistrationClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl RegistrationGatewayPort for HttpRegistrationClient {
    async fn register(
        &self,
        payload: &RegistrationPayload,
    ) -> Result<RegistrationReceipt, GatewayError> {
        let url = endpoint(&self.base_url, "register");
        let span = info_span!("infra.http.register", url = %url);
        async {
            let response = self
                .client
                .post(&url)
                .json(payload)
                .send()
                .await
                .map_err(|e| {
                    error!(error = %e, "registration request failed");
                    GatewayError::Transport(e.to_string())
                })?;

            let status = response.status();
            let body = response.bytes().await.map_err(|e| {
                error!(error = %e, "failed to read registration response");
                GatewayError::Transport(e.to_string())
            })?;

            if !status.is_success() {
                let parsed = serde_json::from_slice::<ErrorBody>(&body).unwrap_or_default();
                warn!(status = status.as_u16(), "registration rejected");
                return Err(GatewayError::rejected(status.as_u16(), parsed.error));
            }

            let receipt = serde_json::from_slice::<RegistrationReceipt>(&body).map_err(|e| {
                error!(error = %e, "unexpected registration response body");
                GatewayError::InvalidResponse(e.to_string())
            })?;
            info!(user_id = %receipt.user_id, "registration accepted");
            Ok(receipt)
        }
        .instrument(span)
        .await
    }
}
