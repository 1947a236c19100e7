//! In-process stand-in for the membership backend.
//!
//! Serves the fixture catalog and answers `register` the way the real
//! endpoint does: a validation delay, an occasional server error and a
//! reserved address that is always taken.

mod fixtures;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use jf_core::catalog::{HealthCondition, Tier};
use jf_core::ports::errors::GatewayError;
use jf_core::ports::{CatalogPort, ClockPort, RegistrationGatewayPort};
use jf_core::submission::{RegistrationPayload, RegistrationReceipt};
use jf_core::validation::{RegistrationSchema, StepSchema, ValidationContext};

pub use fixtures::{health_conditions, membership_tiers};

/// Address the simulated backend treats as already registered.
pub const TAKEN_EMAIL: &str = "test@exists.com";

const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";
const EMAIL_TAKEN_MESSAGE: &str = "This email is already registered.";
const SUCCESS_MESSAGE: &str = "Account created successfully!";

pub struct SimulatedMembershipService {
    latency: Duration,
    failure_rate: f64,
    clock: Arc<dyn ClockPort>,
}

impl SimulatedMembershipService {
    /// `failure_rate` is clamped to `0.0..=1.0`.
    pub fn new(latency: Duration, failure_rate: f64, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            latency,
            failure_rate: failure_rate.clamp(0.0, 1.0),
            clock,
        }
    }

    fn roll_failure(&self) -> bool {
        self.failure_rate > 0.0 && rand::rng().random::<f64>() < self.failure_rate
    }
}

#[async_trait]
impl CatalogPort for SimulatedMembershipService {
    async fn fetch_tiers(&self) -> anyhow::Result<Vec<Tier>> {
        Ok(membership_tiers())
    }

    async fn fetch_health_conditions(&self) -> anyhow::Result<Vec<HealthCondition>> {
        Ok(health_conditions())
    }
}

#[async_trait]
impl RegistrationGatewayPort for SimulatedMembershipService {
    async fn register(
        &self,
        payload: &RegistrationPayload,
    ) -> Result<RegistrationReceipt, GatewayError> {
        let span = info_span!("infra.simulated.register", email = %payload.account.email);
        async {
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }

            let ctx = ValidationContext::new(self.clock.today());
            let violations = RegistrationSchema::validate(payload, &ctx);
            if let Some((field, violation)) = violations.iter().next() {
                warn!(field = field.label(), "simulated backend rejected payload");
                return Err(GatewayError::rejected(400, Some(violation.to_string())));
            }

            if self.roll_failure() {
                warn!("simulated server error");
                return Err(GatewayError::rejected(500, Some(SERVER_ERROR_MESSAGE.into())));
            }

            if payload.account.email == TAKEN_EMAIL {
                debug!("simulated duplicate email");
                return Err(GatewayError::rejected(409, Some(EMAIL_TAKEN_MESSAGE.into())));
            }

            let receipt = RegistrationReceipt {
                success: true,
                message: SUCCESS_MESSAGE.to_string(),
                user_id: Uuid::new_v4().to_string(),
                membership: payload.selected_tier.clone(),
            };
            info!(user_id = %receipt.user_id, "simulated registration accepted");
            Ok(receipt)
        }
        .instrument(span)
        .await
    }
}
