pub mod practice_service;
pub mod template_service;
pub mod upload_service;
pub mod validation;

pub use practice_service::{PracticeError, PracticeService};
pub use upload_service::{FileUpload, UploadError, UploadService};
