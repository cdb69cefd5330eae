//! In-process document stores for development and tests.
//!
//! Semantics match the PostgreSQL repositories: newest-first ordering by timestamp,
//! code point prefix ranges, set-union append and structural removal.

use std::collections::HashMap;

use fauna_core::models::{CatalogEntry, UploadRecord};
use fauna_core::AppError;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::catalog::{prefix_range, CatalogStore};
use super::owner_uploads::OwnerSetStore;

#[derive(Default)]
pub struct MemoryCatalogStore {
    entries: RwLock<Vec<CatalogEntry>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn insert(&self, record: &UploadRecord) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        self.entries.write().await.push(CatalogEntry {
            id,
            record: record.clone(),
        });
        Ok(id)
    }

    async fn query(
        &self,
        limit: u32,
        species_prefix: Option<&str>,
    ) -> Result<Vec<CatalogEntry>, AppError> {
        let range = species_prefix.map(prefix_range);
        let entries = self.entries.read().await;

        // Later inserts win ties, matching created_at DESC
        let mut matched: Vec<CatalogEntry> = entries
            .iter()
            .rev()
            .filter(|entry| match &range {
                Some((lower, upper)) => {
                    let species = entry.record.analysis.species.as_str();
                    species >= lower.as_str() && species < upper.as_str()
                }
                None => true,
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| b.record.timestamp.cmp(&a.record.timestamp));
        matched.truncate(limit as usize);
        Ok(matched)
    }

    async fn delete_by_image_url(
        &self,
        owner_id: &str,
        image_url: &str,
    ) -> Result<u64, AppError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|entry| {
            !(entry.record.owner_id == owner_id && entry.record.image_url == image_url)
        });
        Ok((before - entries.len()) as u64)
    }
}

#[derive(Default)]
pub struct MemoryOwnerSetStore {
    sets: RwLock<HashMap<String, Vec<UploadRecord>>>,
}

impl MemoryOwnerSetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl OwnerSetStore for MemoryOwnerSetStore {
    async fn get_owner_set(&self, owner_id: &str) -> Result<Vec<UploadRecord>, AppError> {
        Ok(self
            .sets
            .read()
            .await
            .get(owner_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn append_to_owner_set(
        &self,
        owner_id: &str,
        record: &UploadRecord,
    ) -> Result<(), AppError> {
        let mut sets = self.sets.write().await;
        let set = sets.entry(owner_id.to_string()).or_default();
        if !set.contains(record) {
            set.push(record.clone());
        }
        Ok(())
    }

    async fn remove_from_owner_set(
        &self,
        owner_id: &str,
        record: &UploadRecord,
    ) -> Result<u64, AppError> {
        let mut sets = self.sets.write().await;
        let Some(set) = sets.get_mut(owner_id) else {
            return Ok(0);
        };
        let before = set.len();
        set.retain(|existing| existing != record);
        let removed = (before - set.len()) as u64;
        if set.is_empty() {
            sets.remove(owner_id);
        }
        Ok(removed)
    }
}
