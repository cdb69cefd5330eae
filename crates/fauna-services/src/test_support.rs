//! Test doubles shared by the service unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use fauna_core::models::{AnimalAnalysis, CatalogEntry, UploadRecord};
use fauna_core::{AppError, StorageBackend};
use fauna_db::{CatalogStore, OwnerSetStore};
use fauna_storage::{Storage, StorageError, StorageResult};
use uuid::Uuid;

use crate::inference::{InferenceError, InferenceGateway};

pub const DOG_REPLY: &str = "```json\n{\"species\": \"Dog\", \"breed\": \"Labrador Retriever\", \"country\": \"Canada\", \"habitat\": \"Domestic\", \"specifications\": \"Short coat\", \"common_problems\": \"Hip dysplasia\", \"fun_facts\": \"Webbed toes\"}\n```";

pub const NOT_AN_ANIMAL_REPLY: &str = "{\"species\": \"N/A\", \"breed\": \"N/A\", \"country\": \"N/A\", \"habitat\": \"N/A\", \"specifications\": \"N/A\", \"common_problems\": \"N/A\", \"fun_facts\": \"N/A\"}";

pub fn sample_record(owner: &str, species: &str, url: &str) -> UploadRecord {
    UploadRecord::new(
        url,
        AnimalAnalysis {
            species: species.to_string(),
            ..Default::default()
        },
        owner,
    )
}

/// Gateway that replays scripted replies and counts calls
pub struct ScriptedGateway {
    replies: Mutex<VecDeque<Result<String, InferenceError>>>,
    calls: AtomicUsize,
    mime_types: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub fn new(replies: Vec<Result<String, InferenceError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
            mime_types: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(reply: &str) -> Self {
        Self::new(vec![Ok(reply.to_string())])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// MIME types the gateway was called with, in call order
    pub fn mime_types(&self) -> Vec<String> {
        self.mime_types.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceGateway for ScriptedGateway {
    async fn analyze(&self, _image: &[u8], mime_type: &str) -> Result<String, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.mime_types.lock().unwrap().push(mime_type.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(InferenceError::EmptyReply))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Blob store kept in a map
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    puts: AtomicUsize,
    pub fail_puts: bool,
}

impl MemoryBlobStore {
    pub fn failing() -> Self {
        Self {
            fail_puts: true,
            ..Default::default()
        }
    }

    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }

    /// Wait for detached cleanup tasks to drain the store down to `expected` blobs
    pub async fn wait_for_len(&self, expected: usize) -> usize {
        for _ in 0..100 {
            if self.len() == expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.len()
    }
}

#[async_trait]
impl Storage for MemoryBlobStore {
    async fn put(
        &self,
        owner_id: &str,
        filename: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<(String, String)> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail_puts {
            return Err(StorageError::UploadFailed("connection refused".to_string()));
        }
        let key = fauna_storage::keys::generate_storage_key(owner_id, filename);
        let url = format!("http://blobs.test/{}", key);
        self.blobs.lock().unwrap().insert(key.clone(), data);
        Ok((key, url))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.blobs.lock().unwrap().remove(storage_key);
        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Ok(self.blobs.lock().unwrap().contains_key(storage_key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

pub struct FailingCatalog;

#[async_trait]
impl CatalogStore for FailingCatalog {
    async fn insert(&self, _record: &UploadRecord) -> Result<Uuid, AppError> {
        Err(AppError::Internal("catalog unavailable".to_string()))
    }

    async fn query(
        &self,
        _limit: u32,
        _species_prefix: Option<&str>,
    ) -> Result<Vec<CatalogEntry>, AppError> {
        Err(AppError::Internal("catalog unavailable".to_string()))
    }

    async fn delete_by_image_url(
        &self,
        _owner_id: &str,
        _image_url: &str,
    ) -> Result<u64, AppError> {
        Err(AppError::Internal("catalog unavailable".to_string()))
    }
}

pub struct FailingOwnerSets;

#[async_trait]
impl OwnerSetStore for FailingOwnerSets {
    async fn get_owner_set(&self, _owner_id: &str) -> Result<Vec<UploadRecord>, AppError> {
        Err(AppError::Internal("owner sets unavailable".to_string()))
    }

    async fn append_to_owner_set(
        &self,
        _owner_id: &str,
        _record: &UploadRecord,
    ) -> Result<(), AppError> {
        Err(AppError::Internal("owner sets unavailable".to_string()))
    }

    async fn remove_from_owner_set(
        &self,
        _owner_id: &str,
        _record: &UploadRecord,
    ) -> Result<u64, AppError> {
        Err(AppError::Internal("owner sets unavailable".to_string()))
    }
}
