use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use shobdo_types::{FavoriteBucket, FavoriteEntry, VocabularyEntry};
use tokio::sync::{RwLock, watch};

use crate::error::PersistenceError;

/// Whole-value key/value persistence for snapshots
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    /// Stored value under `key`, `None` if never written
    async fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Overwrite the value under `key`
    async fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// Bookmarked pairs, mirrored in memory and persisted as one JSON snapshot.
///
/// Identity is the (bangla, korean) pair. A failed write is logged and the
/// in-memory mirror keeps the new state regardless.
pub struct FavoritesStore {
    storage: Arc<dyn SnapshotStorage>,
    key: String,
    favorites: RwLock<Vec<FavoriteEntry>>,
    updates: watch::Sender<Vec<FavoriteEntry>>,
}

impl FavoritesStore {
    pub fn new(storage: Arc<dyn SnapshotStorage>, key: impl Into<String>) -> Self {
        let (updates, _) = watch::channel(Vec::new());

        Self {
            storage,
            key: key.into(),
            favorites: RwLock::new(Vec::new()),
            updates,
        }
    }

    /// Receives a fresh snapshot after every load and mutation
    pub fn subscribe(&self) -> watch::Receiver<Vec<FavoriteEntry>> {
        self.updates.subscribe()
    }

    /// Reload from storage. Missing or unreadable snapshots become empty.
    pub async fn load(&self) -> Vec<FavoriteEntry> {
        let loaded = match self.read_snapshot().await {
            Ok(favorites) => favorites,
            Err(e) => {
                tracing::error!("Failed to load favorites, starting empty: {}", e);
                Vec::new()
            }
        };

        tracing::info!("Loaded {} favorites", loaded.len());

        let mut favorites = self.favorites.write().await;
        *favorites = loaded;
        self.updates.send_replace(favorites.clone());
        favorites.clone()
    }

    /// Add `entry` stamped with the current time, or remove it if its pair is
    /// already bookmarked. Returns whether the pair is bookmarked afterwards.
    pub async fn toggle(&self, entry: &VocabularyEntry) -> bool {
        let mut favorites = self.favorites.write().await;

        let added = match favorites.iter().position(|f| f.matches(entry)) {
            Some(index) => {
                favorites.remove(index);
                false
            }
            None => {
                favorites.push(FavoriteEntry {
                    entry: entry.clone(),
                    timestamp: Local::now().timestamp_millis(),
                });
                true
            }
        };

        tracing::debug!(
            "{} favorite {} / {}",
            if added { "Added" } else { "Removed" },
            entry.bangla,
            entry.korean
        );

        self.persist(&favorites).await;
        self.updates.send_replace(favorites.clone());
        added
    }

    /// Remove the matching pair. Removing an absent pair is a no-op.
    pub async fn remove(&self, entry: &VocabularyEntry) {
        let mut favorites = self.favorites.write().await;

        let before = favorites.len();
        favorites.retain(|f| !f.matches(entry));
        if favorites.len() == before {
            return;
        }

        self.persist(&favorites).await;
        self.updates.send_replace(favorites.clone());
    }

    pub async fn is_favorite(&self, entry: &VocabularyEntry) -> bool {
        self.favorites.read().await.iter().any(|f| f.matches(entry))
    }

    pub async fn snapshot(&self) -> Vec<FavoriteEntry> {
        self.favorites.read().await.clone()
    }

    async fn read_snapshot(&self) -> Result<Vec<FavoriteEntry>, PersistenceError> {
        match self.storage.read(&self.key).await? {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(Vec::new()),
        }
    }

    async fn persist(&self, favorites: &[FavoriteEntry]) {
        let result = match serde_json::to_string(favorites) {
            Ok(data) => self.storage.write(&self.key, &data).await,
            Err(e) => Err(e.into()),
        };

        // TODO: surface repeated write failures instead of only logging them
        if let Err(e) = result {
            tracing::error!("Failed to save favorites: {}", e);
        }
    }
}

/// Group favorites by the local calendar day they were bookmarked on
pub fn categorize(favorites: &[FavoriteEntry]) -> Vec<FavoriteBucket> {
    categorize_at(favorites, &Local::now())
}

/// Newest first, bucketed under "Today", "Yesterday" or the `M/D/YYYY` date,
/// with buckets in the order their first entry appears.
pub fn categorize_at<Tz: TimeZone>(
    favorites: &[FavoriteEntry],
    now: &DateTime<Tz>,
) -> Vec<FavoriteBucket> {
    let today = now.date_naive();
    let yesterday = today.pred_opt();
    let zone = now.timezone();

    let mut sorted = favorites.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut buckets: Vec<FavoriteBucket> = Vec::new();
    for favorite in sorted {
        let Some(stamped) = zone.timestamp_millis_opt(favorite.timestamp).single() else {
            tracing::warn!("Skipping favorite with invalid timestamp {}", favorite.timestamp);
            continue;
        };

        let day = stamped.date_naive();
        let label = if day == today {
            "Today".to_string()
        } else if Some(day) == yesterday {
            "Yesterday".to_string()
        } else {
            day.format("%-m/%-d/%Y").to_string()
        };

        match buckets.iter_mut().find(|b| b.label == label) {
            Some(bucket) => bucket.entries.push(favorite),
            None => buckets.push(FavoriteBucket {
                label,
                entries: vec![favorite],
            }),
        }
    }

    buckets
}
