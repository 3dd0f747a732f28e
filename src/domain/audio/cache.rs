use super::model::{GeneratedTrack, GenerationConfig};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// A finished run kept for download
#[derive(Debug)]
pub struct StoredGeneration {
    pub config: GenerationConfig,
    pub track: GeneratedTrack,
}

impl StoredGeneration {
    pub fn file_name(&self) -> String {
        format!(
            "superlearning_{}_{}_{}_phrases.mp3",
            self.config.native_language, self.config.foreign_language, self.track.pairs_total
        )
    }
}

/// Generated tracks keyed by content digest
#[derive(Clone)]
pub struct GenerationCache {
    entries: Cache<String, Arc<StoredGeneration>>,
}

impl GenerationCache {
    pub fn new(max_capacity: u64, time_to_idle: Duration) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_idle(time_to_idle)
                .build(),
        }
    }

    pub async fn get(&self, hash: &str) -> Option<Arc<StoredGeneration>> {
        self.entries.get(hash).await
    }

    pub async fn insert(&self, hash: String, generation: Arc<StoredGeneration>) {
        self.entries.insert(hash, generation).await;
    }

    /// Returns whether an entry was removed
    pub async fn invalidate(&self, hash: &str) -> bool {
        self.entries.remove(hash).await.is_some()
    }
}
