//! Registration store.
//!
//! Single owner of the wizard aggregate. Every mutation goes through
//! [`RegistrationStore::dispatch`], which runs the pure reducer and then the
//! persistence hook.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info, info_span, warn, Instrument};

use jf_core::ports::RegistrationSnapshotPort;
use jf_core::registration::{
    RegistrationCommand, RegistrationData, RegistrationReducer, RegistrationState, Step,
};

/// Shared registration state plus dispatch lock.
///
/// ## Lock Ordering
/// Acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: held for a whole dispatch, persistence included.
/// - `state`: held only while reading or swapping the aggregate, so reads
///   never wait on storage.
///
/// `restored` is initialised once under `dispatch_lock`; every caller waits
/// on it before touching `state`.
pub struct RegistrationStore {
    state: Mutex<RegistrationState>,
    dispatch_lock: Mutex<()>,
    restored: OnceCell<()>,
    completed: AtomicBool,
    snapshot: Arc<dyn RegistrationSnapshotPort>,
}

impl RegistrationStore {
    pub fn new(snapshot: Arc<dyn RegistrationSnapshotPort>) -> Self {
        Self {
            state: Mutex::new(RegistrationState::default()),
            dispatch_lock: Mutex::new(()),
            restored: OnceCell::new(),
            completed: AtomicBool::new(false),
            snapshot,
        }
    }

    /// Current aggregate.
    pub async fn state(&self) -> RegistrationState {
        self.ensure_restored().await;
        self.state.lock().await.clone()
    }

    pub async fn step(&self) -> Step {
        self.state().await.step
    }

    pub async fn data(&self) -> RegistrationData {
        self.state().await.data
    }

    /// `(step - 1) / (total - 1) * 100`.
    pub async fn progress_percent(&self) -> f64 {
        self.state().await.progress_percent()
    }

    pub async fn is_last_step(&self) -> bool {
        self.state().await.is_last_step()
    }

    /// Whether a registration has been accepted; the aggregate is frozen.
    pub fn is_completed(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }

    /// Move forward one step. No-op on the last step.
    pub async fn next_step(&self) -> RegistrationState {
        let current = self.step().await;
        match current.next() {
            Some(next) => self.dispatch(RegistrationCommand::SetStep(next)).await,
            None => self.state().await,
        }
    }

    /// Move back one step without validation. No-op on the first step.
    pub async fn prev_step(&self) -> RegistrationState {
        let current = self.step().await;
        match current.prev() {
            Some(prev) => self.dispatch(RegistrationCommand::SetStep(prev)).await,
            None => self.state().await,
        }
    }

    /// Apply one command and persist the result.
    ///
    /// Never fails: persistence errors are logged and swallowed.
    pub async fn dispatch(&self, command: RegistrationCommand) -> RegistrationState {
        self.ensure_restored().await;
        let _dispatch_guard = self.dispatch_lock.lock().await;

        let span = info_span!(
            "usecase.registration_store.dispatch",
            command = command.name()
        );
        async {
            if self.is_completed() {
                info!(command = command.name(), "registration completed, ignoring command");
                return self.state.lock().await.clone();
            }

            let is_reset = matches!(command, RegistrationCommand::Reset);
            let current = self.state.lock().await.clone();
            let next = RegistrationReducer::reduce(current.clone(), command);

            if next.step != current.step {
                info!(
                    from = current.step.number(),
                    to = next.step.number(),
                    step = next.step.label(),
                    "registration step transition"
                );
            }

            let data_changed = next.data != current.data;
            *self.state.lock().await = next.clone();
            debug!(data_changed, "registration command applied");

            if is_reset {
                self.clear_snapshot().await;
            } else if data_changed {
                self.persist(&next.data).await;
            }

            next
        }
        .instrument(span)
        .await
    }

    /// Freeze the aggregate after a successful submission and drop the
    /// saved snapshot.
    pub async fn mark_completed(&self) {
        let _dispatch_guard = self.dispatch_lock.lock().await;
        if self.completed.swap(true, Ordering::SeqCst) {
            return;
        }
        info!("registration marked completed");
        self.clear_snapshot().await;
    }

    async fn ensure_restored(&self) {
        self.restored.get_or_init(|| self.restore()).await;
    }

    async fn restore(&self) {
        let _dispatch_guard = self.dispatch_lock.lock().await;
        match self.snapshot.load().await {
            Ok(Some(data)) => {
                let mut state = self.state.lock().await;
                let current = std::mem::take(&mut *state);
                *state =
                    RegistrationReducer::reduce(current, RegistrationCommand::LoadPersisted(data));
                info!(
                    has_tier = state.data.selected_tier.is_some(),
                    "restored saved registration progress"
                );
            }
            Ok(None) => debug!("no saved registration progress"),
            Err(err) => {
                warn!(error = %err, "failed to restore registration progress, starting fresh")
            }
        }
    }

    async fn persist(&self, data: &RegistrationData) {
        if let Err(err) = self.snapshot.save(data).await {
            warn!(error = %err, "failed to persist registration progress");
        }
    }

    async fn clear_snapshot(&self) {
        if let Err(err) = self.snapshot.clear().await {
            warn!(error = %err, "failed to clear saved registration progress");
        }
    }
}
