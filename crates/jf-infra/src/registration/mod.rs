mod file_snapshot;

pub use file_snapshot::{FileRegistrationSnapshotRepository, DEFAULT_SNAPSHOT_FILE};
