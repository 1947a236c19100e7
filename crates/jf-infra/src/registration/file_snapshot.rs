//! File-based registration snapshot repository
//!
//! Persists the in-progress wizard data as one JSON document in the
//! application data directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use jf_core::ports::RegistrationSnapshotPort;
use jf_core::registration::RegistrationData;

pub const DEFAULT_SNAPSHOT_FILE: &str = "registrationData.json";

pub struct FileRegistrationSnapshotRepository {
    snapshot_path: PathBuf,
}

impl FileRegistrationSnapshotRepository {
    /// Create repository with custom file path
    pub fn new(snapshot_path: PathBuf) -> Self {
        Self { snapshot_path }
    }

    /// Create repository with defaults
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            snapshot_path: base_dir.join(DEFAULT_SNAPSHOT_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.snapshot_path
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.snapshot_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl RegistrationSnapshotPort for FileRegistrationSnapshotRepository {
    async fn load(&self) -> anyhow::Result<Option<RegistrationData>> {
        if !fs::try_exists(&self.snapshot_path).await? {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.snapshot_path).await?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: RegistrationData = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse registration snapshot: {}", e))?;

        Ok(Some(data))
    }

    async fn save(&self, data: &RegistrationData) -> anyhow::Result<()> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(data)
            .map_err(|e| anyhow::anyhow!("Failed to serialize registration snapshot: {}", e))?;

        let mut file = fs::File::create(&self.snapshot_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create snapshot file: {}", e))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write snapshot file: {}", e))?;

        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync snapshot file: {}", e))?;

        debug!(
            path = %self.snapshot_path.display(),
            bytes = json.len(),
            "registration snapshot saved"
        );
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        if fs::try_exists(&self.snapshot_path).await? {
            fs::remove_file(&self.snapshot_path).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jf_core::registration::{AccountInfo, PaymentInfo};
    use jf_core::security::SecretText;
    use tempfile::TempDir;

    fn sample() -> RegistrationData {
        RegistrationData {
            account: AccountInfo {
                email: "ada@example.com".into(),
                password: SecretText::new("Sup3rSecret"),
                confirm_password: SecretText::new("Sup3rSecret"),
            },
            health_conditions: vec!["asthma".into()],
            payment: PaymentInfo {
                card_number: "4242 4242 4242 4242".into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_load_returns_none_when_file_not_exists() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileRegistrationSnapshotRepository::new(temp_dir.path().join("missing.json"));

        assert_eq!(repo.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let repo =
            FileRegistrationSnapshotRepository::with_defaults(temp_dir.path().join("nested"));

        repo.save(&sample()).await.unwrap();
        let loaded = repo.load().await.unwrap();

        assert_eq!(loaded, Some(sample()));
        assert!(repo.path().ends_with("nested/registrationData.json"));
    }

    #[tokio::test]
    async fn test_snapshot_uses_camel_case_keys() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileRegistrationSnapshotRepository::with_defaults(temp_dir.path().to_path_buf());

        repo.save(&sample()).await.unwrap();
        let raw = fs::read_to_string(repo.path()).await.unwrap();

        assert!(raw.contains("\"healthConditions\""));
        assert!(raw.contains("\"cardNumber\": \"4242 4242 4242 4242\""));
        assert!(!raw.contains("\"step\""));
    }

    #[tokio::test]
    async fn test_clear_deletes_file() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileRegistrationSnapshotRepository::with_defaults(temp_dir.path().to_path_buf());

        repo.save(&sample()).await.unwrap();
        repo.clear().await.unwrap();
        repo.clear().await.unwrap();

        assert_eq!(repo.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_empty_file_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("empty.json");
        fs::write(&file, "  \n").await.unwrap();

        let repo = FileRegistrationSnapshotRepository::new(file);

        assert_eq!(repo.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalid_json_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("invalid.json");
        fs::write(&file, "{invalid json").await.unwrap();

        let repo = FileRegistrationSnapshotRepository::new(file);
        let result = repo.load().await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse"));
    }
}
