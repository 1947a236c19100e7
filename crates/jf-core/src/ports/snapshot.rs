//! Registration snapshot port
//!
//! Persists the in-progress wizard data between sessions. The current step is
//! never part of the snapshot.

use async_trait::async_trait;

use crate::registration::RegistrationData;

#[async_trait]
pub trait RegistrationSnapshotPort: Send + Sync {
    /// Saved data, or `None` when nothing usable is stored.
    async fn load(&self) -> anyhow::Result<Option<RegistrationData>>;

    /// Overwrite the snapshot.
    async fn save(&self, data: &RegistrationData) -> anyhow::Result<()>;

    /// Remove the snapshot; a missing snapshot is not an error.
    async fn clear(&self) -> anyhow::Result<()>;
}
