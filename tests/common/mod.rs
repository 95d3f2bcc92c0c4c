#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use uuid::Uuid;

use practice_info_api::auth::{Claims, JwtKeys};
use practice_info_api::database::models::{Clinician, PracticeInformationRow};
use practice_info_api::database::{MemoryClinicianDirectory, MemoryPracticeStore, PracticeStore};
use practice_info_api::services::{PracticeService, UploadService};
use practice_info_api::storage::LocalBlobStore;
use practice_info_api::testing::{failing_store, StoreFault};
use practice_info_api::AppState;

pub const JWT_SECRET: &str = "integration-test-secret";

pub struct Options {
    /// Store call that fails with "DB fail"
    pub fault: Option<StoreFault>,
    pub max_upload_bytes: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            fault: None,
            max_upload_bytes: 15 * 1024 * 1024,
        }
    }
}

/// In-process server bound to a free port, backed by memory stores
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: MemoryPracticeStore,
    pub clinician: Clinician,
    pub blob_root: std::path::PathBuf,
    keys: JwtKeys,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(Options::default()).await
    }

    pub async fn spawn_with(options: Options) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let store = MemoryPracticeStore::new();
        let backing: Arc<dyn PracticeStore> = match options.fault {
            None => Arc::new(store.clone()),
            Some(fault) => failing_store(store.clone(), fault),
        };

        let clinician = Clinician {
            id: Uuid::new_v4(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            user_id: Uuid::new_v4(),
        };
        let directory = MemoryClinicianDirectory::new();
        directory.register(clinician.clone()).await;

        let blob_root = std::env::temp_dir().join(format!("practice-info-test-{}", Uuid::new_v4()));
        let blobs = LocalBlobStore::new(&blob_root, &format!("{}/blobs", base_url))?;
        blobs.ensure_container("uploads").await?;

        let keys = JwtKeys::from_secret(JWT_SECRET)?;
        let state = AppState::new(
            keys.clone(),
            PracticeService::new(backing, Arc::new(directory)),
            UploadService::new(Arc::new(blobs), "uploads", options.max_upload_bytes),
        );

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, practice_info_api::app(state)).await;
        });

        let server = Self {
            port,
            base_url,
            store,
            clinician,
            blob_root,
            keys,
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(format!("{}/health", self.base_url)).send().await {
                if resp.status().is_success() {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Bearer token for the seeded clinician's user
    pub fn token(&self) -> String {
        self.token_for(self.clinician.user_id)
    }

    pub fn token_for(&self, user_id: Uuid) -> String {
        let claims = Claims::new(user_id, vec!["ADMIN".to_string()], chrono::Duration::hours(1));
        self.keys.issue(&claims).expect("token")
    }

    /// Insert a stored row for the seeded clinician
    pub async fn seed(&self, name: &str, phone_numbers_json: &str, tele_health: bool) -> PracticeInformationRow {
        let row = PracticeInformationRow {
            id: Uuid::new_v4(),
            clinician_id: self.clinician.id,
            practice_name: name.to_string(),
            practice_email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            time_zone: "UTC".to_string(),
            practice_logo: Some("seed.png".to_string()),
            phone_numbers: phone_numbers_json.to_string(),
            tele_health,
        };
        self.store.insert(row.clone()).await;
        row
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.blob_root);
    }
}
