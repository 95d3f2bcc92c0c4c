use std::sync::Arc;
use thiserror::Error;

use crate::auth::Session;
use crate::storage::{BlobError, BlobStore, UploadedBlob};

pub const ALLOWED_FILE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("No file provided")]
    MissingFile,

    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    #[error("File exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Invalid multipart body: {0}")]
    Multipart(String),

    #[error(transparent)]
    Storage(#[from] BlobError),
}

/// A file received from a multipart form
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct UploadService {
    blobs: Arc<dyn BlobStore>,
    container: String,
    max_bytes: usize,
}

impl UploadService {
    pub fn new(blobs: Arc<dyn BlobStore>, container: impl Into<String>, max_bytes: usize) -> Self {
        Self {
            blobs,
            container: container.into(),
            max_bytes,
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Validate the file and hand it to blob storage
    pub async fn upload(&self, session: &Session, file: Option<FileUpload>) -> Result<UploadedBlob, UploadError> {
        let file = file.ok_or(UploadError::MissingFile)?;

        if !ALLOWED_FILE_TYPES.contains(&file.content_type.as_str()) {
            return Err(UploadError::InvalidFileType(file.content_type));
        }
        if file.bytes.len() > self.max_bytes {
            return Err(UploadError::TooLarge { limit: self.max_bytes });
        }

        tracing::debug!(
            "Upload from user {}: name={} type={} size={}",
            session.user_id,
            file.file_name,
            file.content_type,
            file.bytes.len()
        );

        Ok(self.blobs.upload(file.bytes, &file.file_name, &self.container).await?)
    }
}
