use std::sync::Arc;

use crate::auth::JwtKeys;
use crate::services::{PracticeService, UploadService};

/// Shared handles every handler receives through `State`
#[derive(Clone)]
pub struct AppState {
    pub jwt: Arc<JwtKeys>,
    pub practice: PracticeService,
    pub uploads: UploadService,
}

impl AppState {
    pub fn new(jwt: JwtKeys, practice: PracticeService, uploads: UploadService) -> Self {
        Self {
            jwt: Arc::new(jwt),
            practice,
            uploads,
        }
    }
}
