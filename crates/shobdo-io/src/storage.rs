use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use shobdo_core::error::PersistenceError;
use shobdo_core::favorites::SnapshotStorage;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// One JSON file per key inside a data directory
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl SnapshotStorage for JsonFileStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key);
        tracing::debug!("Reading snapshot from {:?}", path);

        match fs::read_to_string(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::Read(e.to_string())),
        }
    }

    /// Write to a temp file, sync, then rename over the old snapshot
    async fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| PersistenceError::Write(e.to_string()))?;

        let path = self.path_for(key);
        let temp_path = path.with_extension("tmp");

        if let Err(e) = write_synced(&temp_path, value).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        fs::rename(&temp_path, &path).await.map_err(|e| {
            PersistenceError::Write(format!("Failed to rename: {}", e))
        })?;

        tracing::debug!("Snapshot {:?} persisted", path);
        Ok(())
    }
}

async fn write_synced(path: &Path, value: &str) -> Result<(), PersistenceError> {
    let mut file = fs::File::create(path)
        .await
        .map_err(|e| PersistenceError::Write(format!("Failed to create temp file: {}", e)))?;
    file.write_all(value.as_bytes())
        .await
        .map_err(|e| PersistenceError::Write(format!("Failed to write: {}", e)))?;
    file.sync_all()
        .await
        .map_err(|e| PersistenceError::Write(format!("Failed to sync: {}", e)))?;
    Ok(())
}
