//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p pixshift-api --test transform_test`.

pub mod fixtures;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use pixshift_api::setup::routes;
use pixshift_api::state::AppState;
use pixshift_core::{Config, OutputCategory, PipelineConfig};
use pixshift_storage::{LocalStorage, Storage};
use std::sync::Arc;
use tempfile::TempDir;

/// Test application: server, storage, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<dyn Storage>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Contents of every object stored in `category`, ordered by key.
    pub async fn stored(&self, category: OutputCategory) -> Vec<Vec<u8>> {
        let keys = self
            .storage
            .list(category)
            .await
            .expect("Failed to list storage");

        let mut out = Vec::with_capacity(keys.len());
        for key in keys {
            out.push(self.storage.load(&key).await.expect("Failed to load object"));
        }
        out
    }

    pub async fn stored_count(&self, category: OutputCategory) -> usize {
        self.storage
            .list(category)
            .await
            .expect("Failed to list storage")
            .len()
    }
}

/// Setup test app with local storage in a temp directory and default settings.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

/// Setup test app, letting the caller adjust the configuration first.
pub async fn setup_test_app_with(configure: impl FnOnce(&mut PipelineConfig)) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");

    let mut pipeline_config = PipelineConfig {
        local_storage_path: temp_dir.path().to_string_lossy().to_string(),
        ..Default::default()
    };
    configure(&mut pipeline_config);
    let config = Config::new(pipeline_config);
    config.validate().expect("Invalid test configuration");

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(config.local_storage_path())
            .await
            .expect("Failed to create local storage"),
    );

    let state = Arc::new(AppState::new(config.clone(), storage.clone()));
    let app = routes::setup_routes(&config, state);
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        storage,
        _temp_dir: temp_dir,
    }
}

/// Multipart form with one `Images` part per `(file_name, bytes)`.
pub fn images_form(files: Vec<(&str, Vec<u8>)>) -> MultipartForm {
    files
        .into_iter()
        .fold(MultipartForm::new(), |form, (name, data)| {
            let mime = if name.ends_with(".png") {
                "image/png"
            } else {
                "application/octet-stream"
            };
            form.add_part(
                "Images",
                Part::bytes(bytes::Bytes::from(data))
                    .file_name(name.to_string())
                    .mime_type(mime),
            )
        })
}
