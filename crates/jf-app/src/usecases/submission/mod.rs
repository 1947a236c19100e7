//! Submit registration use case.
//!
//! Drives [`SubmissionStateMachine`] for the review step: checks the composite
//! schema, sends the payload with a timeout, and supports cancelling the
//! in-flight request.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, warn, Instrument};

use jf_core::ports::{ClockPort, GatewayError, RegistrationGatewayPort};
use jf_core::registration::{RegistrationData, Step};
use jf_core::submission::{
    RegistrationPayload, SubmissionAction, SubmissionEvent, SubmissionState,
    SubmissionStateMachine,
};
use jf_core::validation::{RegistrationSchema, StepSchema, ValidationContext};

use crate::usecases::registration::RegistrationStore;

/// Message shown when the endpoint does not answer within the timeout.
pub const TIMEOUT_MESSAGE: &str = "Request timed out. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("you must agree to the terms and the waiver before submitting")]
    NotAgreed,
    #[error("registration already submitted")]
    AlreadySubmitted,
    #[error("a submission is already in flight")]
    AlreadyInFlight,
    #[error("submission is only available on the review step (current: {0:?})")]
    NotOnReviewStep(Step),
}

pub struct SubmitRegistration {
    store: Arc<RegistrationStore>,
    gateway: Arc<dyn RegistrationGatewayPort>,
    clock: Arc<dyn ClockPort>,
    timeout: Duration,
    state: Mutex<SubmissionState>,
    in_flight: Mutex<Option<CancellationToken>>,
}

impl SubmitRegistration {
    pub fn new(
        store: Arc<RegistrationStore>,
        gateway: Arc<dyn RegistrationGatewayPort>,
        clock: Arc<dyn ClockPort>,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            gateway,
            clock,
            timeout,
            state: Mutex::new(SubmissionState::Idle),
            in_flight: Mutex::new(None),
        }
    }

    pub async fn state(&self) -> SubmissionState {
        self.lock_state().clone()
    }

    /// Abort the in-flight request. Returns whether one was running.
    pub fn cancel(&self) -> bool {
        let token = match self.in_flight.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        match token {
            Some(token) => {
                info!("cancelling registration submission");
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Submit the assembled registration.
    ///
    /// Endpoint failures are not errors of this call: they end in
    /// [`SubmissionState::Failed`] and a later call retries.
    pub async fn execute(&self) -> Result<SubmissionState, SubmissionError> {
        let state = self.store.state().await;
        let data = state.data;

        let span = info_span!(
            "usecase.submit_registration.execute",
            tier = data.selected_tier.as_ref().map(|t| t.id.as_str()).unwrap_or("")
        );
        async {
            let actions = {
                let mut current = self.lock_state();
                match &*current {
                    SubmissionState::Succeeded { .. } => {
                        return Err(SubmissionError::AlreadySubmitted)
                    }
                    SubmissionState::Submitting => return Err(SubmissionError::AlreadyInFlight),
                    _ => {}
                }
                if state.step != Step::Review {
                    return Err(SubmissionError::NotOnReviewStep(state.step));
                }
                let all_agreed = data.legal.all_agreed();
                if !all_agreed {
                    return Err(SubmissionError::NotAgreed);
                }
                self.apply(&mut current, SubmissionEvent::Submit { all_agreed })
            };
            let _guard = InFlightGuard { owner: self };

            let mut pending = actions;
            while !pending.is_empty() {
                let mut follow_up = Vec::new();
                for action in pending {
                    let event = self.execute_action(action, &data).await;
                    if let Some(event) = event {
                        let mut current = self.lock_state();
                        follow_up.extend(self.apply(&mut current, event));
                    }
                }
                pending = follow_up;
            }

            Ok(self.state().await)
        }
        .instrument(span)
        .await
    }

    fn apply(
        &self,
        current: &mut SubmissionState,
        event: SubmissionEvent,
    ) -> Vec<SubmissionAction> {
        let from = std::mem::take(current);
        let from_label = state_label(&from);
        let (next, actions) = SubmissionStateMachine::transition(from, event);
        info!(from = from_label, to = state_label(&next), "submission state transition");
        *current = next;
        actions
    }

    async fn execute_action(
        &self,
        action: SubmissionAction,
        data: &RegistrationData,
    ) -> Option<SubmissionEvent> {
        match action {
            SubmissionAction::SendRegistration => Some(self.send(data).await),
            SubmissionAction::MarkRegistrationComplete => {
                self.store.mark_completed().await;
                None
            }
        }
    }

    async fn send(&self, data: &RegistrationData) -> SubmissionEvent {
        let payload = RegistrationPayload::from_data(data);
        let ctx = ValidationContext::new(self.clock.today());
        let violations = RegistrationSchema::validate(&payload, &ctx);
        if let Some((field, violation)) = violations.iter().next() {
            warn!(
                field = field.label(),
                violations = violations.len(),
                "registration payload failed the composite schema"
            );
            return SubmissionEvent::Failed {
                message: violation.to_string(),
            };
        }

        let token = CancellationToken::new();
        self.set_in_flight(Some(token.clone()));

        let request = tokio::time::timeout(self.timeout, self.gateway.register(&payload));
        let outcome = tokio::select! {
            _ = token.cancelled() => None,
            result = request => Some(result),
        };
        self.set_in_flight(None);

        match outcome {
            None => SubmissionEvent::Cancelled,
            Some(Err(_elapsed)) => {
                warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "registration request timed out"
                );
                SubmissionEvent::Failed {
                    message: TIMEOUT_MESSAGE.to_string(),
                }
            }
            Some(Ok(Ok(receipt))) => {
                info!(user_id = %receipt.user_id, "registration accepted");
                SubmissionEvent::Succeeded { receipt }
            }
            Some(Ok(Err(err))) => {
                match &err {
                    GatewayError::Rejected { status, message } => {
                        warn!(status, message = %message, "registration rejected")
                    }
                    GatewayError::Transport(_) | GatewayError::InvalidResponse(_) => {
                        error!(error = %err, "registration request failed")
                    }
                }
                SubmissionEvent::Failed {
                    message: err.user_message(),
                }
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SubmissionState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn set_in_flight(&self, token: Option<CancellationToken>) {
        match self.in_flight.lock() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }
}

/// Returns a dropped submission to `Idle`.
///
/// The `execute` future may be dropped while the request is pending. The
/// token is released and a `Submitting` state is cancelled so the next call
/// can retry.
struct InFlightGuard<'a> {
    owner: &'a SubmitRegistration,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner.set_in_flight(None);
        let mut current = self.owner.lock_state();
        if matches!(*current, SubmissionState::Submitting) {
            warn!("submission dropped while in flight, returning to idle");
            self.owner.apply(&mut current, SubmissionEvent::Cancelled);
        }
    }
}

fn state_label(state: &SubmissionState) -> &'static str {
    match state {
        SubmissionState::Idle => "idle",
        SubmissionState::Submitting => "submitting",
        SubmissionState::Succeeded { .. } => "success",
        SubmissionState::Failed { .. } => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::testing::{
        complete_data, gold_tier, memory_store, FixedClock, MemorySnapshot,
    };
    use async_trait::async_trait;
    use jf_core::registration::{LegalPatch, RegistrationCommand};
    use jf_core::submission::RegistrationReceipt;
    use mockall::mock;

    mock! {
        pub Gateway {}

        #[async_trait]
        impl RegistrationGatewayPort for Gateway {
            async fn register(
                &self,
                payload: &RegistrationPayload,
            ) -> Result<RegistrationReceipt, GatewayError>;
        }
    }

    struct PendingGateway;

    #[async_trait]
    impl RegistrationGatewayPort for PendingGateway {
        async fn register(
            &self,
            _payload: &RegistrationPayload,
        ) -> Result<RegistrationReceipt, GatewayError> {
            std::future::pending().await
        }
    }

    fn receipt() -> RegistrationReceipt {
        RegistrationReceipt {
            success: true,
            message: "Account created successfully!".into(),
            user_id: "7f1c".into(),
            membership: Some(gold_tier()),
        }
    }

    async fn review_store(
        data: RegistrationData,
    ) -> (Arc<RegistrationStore>, Arc<MemorySnapshot>) {
        let (store, snapshot) = memory_store();
        store.dispatch(RegistrationCommand::SetTier(gold_tier())).await;
        store.dispatch(RegistrationCommand::LoadPersisted(data)).await;
        for _ in 0..5 {
            store.next_step().await;
        }
        (store, snapshot)
    }

    fn submit_with(
        store: Arc<RegistrationStore>,
        gateway: Arc<dyn RegistrationGatewayPort>,
    ) -> SubmitRegistration {
        SubmitRegistration::new(
            store,
            gateway,
            Arc::new(FixedClock::october_2026()),
            Duration::from_secs(30),
        )
    }

    #[tokio::test]
    async fn success_completes_registration_and_clears_snapshot() {
        let (store, snapshot) = review_store(complete_data()).await;
        assert!(snapshot.saved.lock().unwrap().is_some());
        let mut gateway = MockGateway::new();
        gateway
            .expect_register()
            .withf(|payload| payload.payment.card_number == "4242424242424242")
            .times(1)
            .returning(|_| Ok(receipt()));
        let submit = submit_with(store.clone(), Arc::new(gateway));

        let state = submit.execute().await.unwrap();

        assert!(state.is_terminal());
        assert!(store.is_completed());
        assert!(snapshot.saved.lock().unwrap().is_none());
        assert_eq!(submit.execute().await, Err(SubmissionError::AlreadySubmitted));
    }

    #[tokio::test]
    async fn rejection_message_is_shown_and_retry_is_allowed() {
        let (store, _) = review_store(complete_data()).await;
        let mut gateway = MockGateway::new();
        let mut seq = mockall::Sequence::new();
        gateway
            .expect_register()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(GatewayError::rejected(
                    409,
                    Some("This email is already registered.".into()),
                ))
            });
        gateway
            .expect_register()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(receipt()));
        let submit = submit_with(store.clone(), Arc::new(gateway));

        let failed = submit.execute().await.unwrap();
        assert_eq!(failed.error_message(), Some("This email is already registered."));
        assert!(!store.is_completed());

        let retried = submit.execute().await.unwrap();
        assert!(retried.is_terminal());
    }

    #[tokio::test]
    async fn transport_failure_uses_generic_message() {
        let (store, _) = review_store(complete_data()).await;
        let mut gateway = MockGateway::new();
        gateway
            .expect_register()
            .returning(|_| Err(GatewayError::Transport("connection refused".into())));
        let submit = submit_with(store, Arc::new(gateway));

        let state = submit.execute().await.unwrap();

        assert_eq!(
            state.error_message(),
            Some("Failed to create account. Please try again.")
        );
    }

    #[tokio::test]
    async fn submission_requires_both_agreements() {
        let (store, _) = review_store(complete_data()).await;
        store
            .dispatch(RegistrationCommand::UpdateLegal(LegalPatch {
                agree_waiver: Some(false),
                ..Default::default()
            }))
            .await;
        let mut gateway = MockGateway::new();
        gateway.expect_register().never();
        let submit = submit_with(store, Arc::new(gateway));

        assert_eq!(submit.execute().await, Err(SubmissionError::NotAgreed));
        assert_eq!(submit.state().await, SubmissionState::Idle);
    }

    #[tokio::test]
    async fn submission_only_from_review_step() {
        let (store, _) = review_store(complete_data()).await;
        store.prev_step().await;
        let mut gateway = MockGateway::new();
        gateway.expect_register().never();
        let submit = submit_with(store, Arc::new(gateway));

        assert_eq!(
            submit.execute().await,
            Err(SubmissionError::NotOnReviewStep(Step::Payment))
        );
    }

    #[tokio::test]
    async fn composite_violation_fails_before_sending() {
        let mut data = complete_data();
        data.personal.first_name = "A".into();
        let (store, _) = review_store(data).await;
        let mut gateway = MockGateway::new();
        gateway.expect_register().never();
        let submit = submit_with(store, Arc::new(gateway));

        let state = submit.execute().await.unwrap();

        assert_eq!(
            state.error_message(),
            Some("First name must be at least 2 characters")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn slow_endpoint_times_out() {
        let (store, _) = review_store(complete_data()).await;
        let submit = submit_with(store.clone(), Arc::new(PendingGateway));

        let state = submit.execute().await.unwrap();

        assert_eq!(state.error_message(), Some(TIMEOUT_MESSAGE));
        assert!(!store.is_completed());
    }

    #[tokio::test]
    async fn cancel_returns_to_idle() {
        let (store, _) = review_store(complete_data()).await;
        let submit = Arc::new(submit_with(store, Arc::new(PendingGateway)));
        assert!(!submit.cancel());

        let running = tokio::spawn({
            let submit = submit.clone();
            async move { submit.execute().await }
        });
        while !submit.cancel() {
            tokio::task::yield_now().await;
        }

        let state = running.await.unwrap().unwrap();
        assert_eq!(state, SubmissionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn aborted_submission_can_be_retried() {
        let (store, _) = review_store(complete_data()).await;
        let submit = Arc::new(submit_with(store, Arc::new(PendingGateway)));

        let running = tokio::spawn({
            let submit = submit.clone();
            async move { submit.execute().await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(submit.state().await, SubmissionState::Submitting);

        running.abort();
        assert!(running.await.unwrap_err().is_cancelled());

        assert_eq!(submit.state().await, SubmissionState::Idle);
        assert!(!submit.cancel());
        let retried = submit.execute().await.unwrap();
        assert_eq!(retried.error_message(), Some(TIMEOUT_MESSAGE));
    }
}
