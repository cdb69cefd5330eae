//! Test helpers: build AppState and router for integration tests.
//!
//! The app runs against in-memory document stores, local blob storage in a temp
//! directory, and a scripted inference gateway. Run from workspace root:
//! `cargo test -p fauna-api`.

#![allow(dead_code)]

pub mod fixtures;

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use fauna_api::auth::JwtIdentityProvider;
use fauna_api::constants;
use fauna_api::setup::{routes, services};
use fauna_core::constants::{DEFAULT_FEED_LIMIT, MAX_FEED_LIMIT};
use fauna_core::{
    BaseConfig, Config, DocumentStoreBackend, FaunaConfig, InferenceSettings, StorageBackend,
};
use fauna_db::DocumentStores;
use fauna_services::{InferenceError, InferenceGateway};
use fauna_storage::{LocalStorage, Storage};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";

/// Upload limit used by the test app
pub const TEST_MAX_FILE_SIZE: usize = 4096;

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Gateway that replays scripted replies, then repeats `fallback`
pub struct ScriptedGateway {
    replies: Mutex<VecDeque<Result<String, InferenceError>>>,
    fallback: String,
    calls: AtomicUsize,
}

impl ScriptedGateway {
    pub fn always(reply: &str) -> Self {
        Self::new(Vec::new(), reply)
    }

    pub fn new(replies: Vec<Result<String, InferenceError>>, fallback: &str) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            fallback: fallback.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InferenceGateway for ScriptedGateway {
    async fn analyze(&self, _image: &[u8], _mime_type: &str) -> Result<String, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(self.fallback.clone()))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Test application: server plus handles on everything behind it.
pub struct TestApp {
    pub server: TestServer,
    pub gateway: Arc<ScriptedGateway>,
    pub documents: DocumentStores,
    pub identity: JwtIdentityProvider,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// `Authorization` header value for `owner_id`
    pub fn bearer(&self, owner_id: &str) -> String {
        let token = self
            .identity
            .issue_token(owner_id, 3600)
            .expect("Failed to issue test token");
        format!("Bearer {}", token)
    }

    /// Number of blobs currently in local storage
    pub fn blob_count(&self) -> usize {
        count_files(&self._temp_dir.path().join("uploads"))
    }

    /// Wait for detached blob cleanup to bring local storage down to `expected` blobs
    pub async fn wait_for_blob_count(&self, expected: usize) -> usize {
        for _ in 0..100 {
            if self.blob_count() == expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.blob_count()
    }

    /// POST `data` as the `file` field of a multipart upload
    pub async fn upload(
        &self,
        owner_id: &str,
        data: Vec<u8>,
        filename: &str,
        mime_type: &str,
    ) -> TestResponse {
        let part = Part::bytes(bytes::Bytes::from(data))
            .file_name(filename.to_string())
            .mime_type(mime_type.to_string());
        self.server
            .post(&api_path("/uploads"))
            .add_header("Authorization", self.bearer(owner_id))
            .multipart(MultipartForm::new().add_part("file", part))
            .await
    }
}

fn count_files(dir: &Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .map(|entry| {
            let path = entry.path();
            if path.is_dir() {
                count_files(&path)
            } else {
                1
            }
        })
        .sum()
}

pub fn create_test_config(storage_path: &Path) -> Config {
    Config(Box::new(FaunaConfig {
        base: BaseConfig {
            server_port: 4000,
            cors_origins: vec!["*".to_string()],
            db_max_connections: 5,
            db_timeout_seconds: 30,
            jwt_secret: TEST_JWT_SECRET.to_string(),
            environment: "test".to_string(),
        },
        document_store: DocumentStoreBackend::Memory,
        database_url: None,
        storage_backend: StorageBackend::Local,
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        aws_region: None,
        local_storage_path: Some(storage_path.to_string_lossy().into_owned()),
        local_storage_base_url: Some("http://localhost:4000/media".to_string()),
        max_file_size_bytes: TEST_MAX_FILE_SIZE,
        allowed_content_types: vec![
            "image/png".to_string(),
            "image/jpeg".to_string(),
            "image/jpg".to_string(),
        ],
        inference: InferenceSettings::with_api_key("test-key"),
        feed_default_limit: DEFAULT_FEED_LIMIT,
        feed_max_limit: MAX_FEED_LIMIT,
    }))
}

/// Setup test app whose gateway always answers with a Labrador analysis.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(ScriptedGateway::always(fixtures::DOG_REPLY)).await
}

pub async fn setup_test_app_with(gateway: ScriptedGateway) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = create_test_config(temp_dir.path());

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(
            temp_dir.path().to_path_buf(),
            "http://localhost:4000/media".to_string(),
        )
        .await
        .expect("Failed to create local storage"),
    );

    let documents = DocumentStores::memory();
    let gateway = Arc::new(gateway);

    let state = services::build_state(
        config.clone(),
        documents.clone(),
        storage,
        gateway.clone(),
        Arc::new(JwtIdentityProvider::new(TEST_JWT_SECRET)),
    );
    let router = routes::setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        gateway,
        documents,
        identity: JwtIdentityProvider::new(TEST_JWT_SECRET),
        _temp_dir: temp_dir,
    }
}
