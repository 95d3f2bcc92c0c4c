use async_trait::async_trait;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

/// Storage failure kinds surfaced to the upload boundary
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("Invalid blob URL: {0}")]
    InvalidUrl(String),

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Storage authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedBlob {
    pub url: String,
    pub blob_name: String,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(&self, bytes: Vec<u8>, file_name: &str, container: &str) -> Result<UploadedBlob, BlobError>;
}

/// Filesystem-backed blob store: `<root>/<container>/<blob>` served under `public_base_url`
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: Url,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Result<Self, BlobError> {
        let mut public_base_url =
            Url::parse(public_base_url).map_err(|e| BlobError::InvalidUrl(format!("{}: {}", public_base_url, e)))?;
        if public_base_url.cannot_be_a_base() {
            return Err(BlobError::InvalidUrl(public_base_url.to_string()));
        }
        if !public_base_url.path().ends_with('/') {
            let path = format!("{}/", public_base_url.path());
            public_base_url.set_path(&path);
        }

        Ok(Self {
            root: root.into(),
            public_base_url,
        })
    }

    /// Create the container directory if it does not exist yet
    pub async fn ensure_container(&self, container: &str) -> Result<(), BlobError> {
        tokio::fs::create_dir_all(self.root.join(container))
            .await
            .map_err(|e| classify_io(e, container))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn upload(&self, bytes: Vec<u8>, file_name: &str, container: &str) -> Result<UploadedBlob, BlobError> {
        let container_dir = self.root.join(container);
        match tokio::fs::metadata(&container_dir).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(BlobError::ContainerNotFound(container.to_string())),
            Err(e) => return Err(classify_io(e, container)),
        }

        let blob_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(file_name));
        tokio::fs::write(container_dir.join(&blob_name), &bytes)
            .await
            .map_err(|e| classify_io(e, container))?;

        let url = self
            .public_base_url
            .join(&format!("{}/{}", container, blob_name))
            .map_err(|e| BlobError::InvalidUrl(e.to_string()))?;

        tracing::info!("Stored blob {} ({} bytes) in container {}", blob_name, bytes.len(), container);

        Ok(UploadedBlob {
            url: url.to_string(),
            blob_name,
        })
    }
}

fn classify_io(err: std::io::Error, container: &str) -> BlobError {
    match err.kind() {
        ErrorKind::NotFound => BlobError::ContainerNotFound(container.to_string()),
        ErrorKind::PermissionDenied => BlobError::AuthenticationFailed(err.to_string()),
        _ => BlobError::Io(err),
    }
}

/// Reduce a client-supplied file name to a safe single path segment
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("blob-store-{}", Uuid::new_v4()))
    }

    #[test]
    fn file_names_are_sanitized() {
        assert_eq!(sanitize_file_name("logo.png"), "logo.png");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\my logo.jpg"), "my_logo.jpg");
        assert_eq!(sanitize_file_name(".."), "upload");
        assert_eq!(sanitize_file_name(""), "upload");
    }

    #[test]
    fn malformed_base_url_is_invalid() {
        assert!(matches!(
            LocalBlobStore::new(temp_root(), "not a url"),
            Err(BlobError::InvalidUrl(_))
        ));
        assert!(matches!(
            LocalBlobStore::new(temp_root(), "mailto:someone@example.com"),
            Err(BlobError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn upload_writes_file_and_reports_url() {
        let root = temp_root();
        let store = LocalBlobStore::new(&root, "http://localhost:3000/blobs").unwrap();
        store.ensure_container("uploads").await.unwrap();

        let blob = store.upload(b"png-bytes".to_vec(), "logo.png", "uploads").await.unwrap();

        assert!(blob.blob_name.ends_with("-logo.png"));
        assert_eq!(blob.url, format!("http://localhost:3000/blobs/uploads/{}", blob.blob_name));
        let written = tokio::fs::read(root.join("uploads").join(&blob.blob_name)).await.unwrap();
        assert_eq!(written, b"png-bytes");

        let _ = tokio::fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn missing_container_is_classified() {
        let store = LocalBlobStore::new(temp_root(), "http://localhost:3000/blobs/").unwrap();
        let err = store.upload(vec![1, 2, 3], "logo.png", "uploads").await.unwrap_err();
        assert!(matches!(err, BlobError::ContainerNotFound(ref c) if c == "uploads"));
    }
}
