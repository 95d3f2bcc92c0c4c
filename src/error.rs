// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Field name -> human readable failure reason
pub type FieldErrors = BTreeMap<String, String>;

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Every variant serializes as `{ "error": <message>, "details"?: <value> }`.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest { message: String, details: Option<Value> },

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 422 Unprocessable Entity
    UnprocessableEntity { message: String, field_errors: FieldErrors },

    // 500 Internal Server Error
    InternalServerError { message: String, details: Option<Value> },

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest { message, .. } => message,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::UnprocessableEntity { message, .. } => message,
            ApiError::InternalServerError { message, .. } => message,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        let mut body = json!({ "error": self.message() });

        match self {
            ApiError::UnprocessableEntity { field_errors, .. } => {
                body["details"] = json!(field_errors);
            }
            ApiError::BadRequest { details: Some(details), .. }
            | ApiError::InternalServerError { details: Some(details), .. } => {
                body["details"] = details.clone();
            }
            _ => {}
        }

        body
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest { message: message.into(), details: None }
    }

    pub fn bad_request_with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            details: Some(Value::String(details.into())),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn unprocessable_entity(message: impl Into<String>, field_errors: FieldErrors) -> Self {
        ApiError::UnprocessableEntity {
            message: message.into(),
            field_errors,
        }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError { message: message.into(), details: None }
    }

    pub fn internal_server_error_with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        ApiError::InternalServerError {
            message: message.into(),
            details: Some(Value::String(details.into())),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

impl From<crate::services::practice_service::PracticeError> for ApiError {
    fn from(err: crate::services::practice_service::PracticeError) -> Self {
        use crate::services::practice_service::PracticeError;

        match err {
            PracticeError::Unauthenticated => ApiError::unauthorized("Unauthorized"),
            PracticeError::ClinicianNotFound => ApiError::not_found("Clinician not found"),
            PracticeError::NotFound => ApiError::not_found("Practice information not found"),
            PracticeError::InvalidPayload(field_errors) => {
                ApiError::unprocessable_entity("Invalid request payload", field_errors)
            }
            PracticeError::FetchFailed(cause) => {
                // Log the real error but return generic message
                tracing::error!("Failed to fetch practice information: {}", cause);
                ApiError::internal_server_error("Failed to fetch practice information")
            }
            PracticeError::UpdateFailed(cause) => {
                tracing::error!("Failed to update practice information: {}", cause);
                ApiError::internal_server_error("Failed to update practice information")
            }
        }
    }
}

impl From<crate::services::upload_service::UploadError> for ApiError {
    fn from(err: crate::services::upload_service::UploadError) -> Self {
        use crate::services::upload_service::UploadError;
        use crate::storage::BlobError;

        match err {
            UploadError::Unauthenticated => ApiError::unauthorized("Unauthorized"),
            UploadError::MissingFile => ApiError::bad_request("No file provided"),
            UploadError::InvalidFileType(content_type) => {
                tracing::debug!("Rejected upload with content type '{}'", content_type);
                ApiError::bad_request("Invalid file type. Only jpg, jpeg, and png files are allowed.")
            }
            UploadError::TooLarge { limit } => {
                ApiError::bad_request(format!("File size exceeds {}MB limit", limit / (1024 * 1024)))
            }
            UploadError::Multipart(msg) => ApiError::bad_request_with_details("Invalid multipart body", msg),
            UploadError::Storage(blob_err) => {
                tracing::error!("Full upload error: {}", blob_err);
                match blob_err {
                    BlobError::InvalidUrl(_) => ApiError::bad_request_with_details(
                        "Invalid blob URL",
                        "The provided URL is not properly formatted",
                    ),
                    BlobError::ContainerNotFound(_) => ApiError::internal_server_error_with_details(
                        "Storage configuration error",
                        "Upload destination not found",
                    ),
                    BlobError::AuthenticationFailed(_) => ApiError::internal_server_error_with_details(
                        "Storage authentication error",
                        "Failed to authenticate with storage provider",
                    ),
                    BlobError::Io(_) => ApiError::internal_server_error_with_details(
                        "Internal server error",
                        "Failed to upload file",
                    ),
                }
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::store::StoreError;
    use crate::services::practice_service::PracticeError;

    #[test]
    fn unprocessable_entity_carries_details() {
        let mut field_errors = FieldErrors::new();
        field_errors.insert("practiceName".to_string(), "must be a non-empty string".to_string());

        let err: ApiError = PracticeError::InvalidPayload(field_errors).into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = err.to_json();
        assert_eq!(body["error"], "Invalid request payload");
        assert_eq!(body["details"]["practiceName"], "must be a non-empty string");
    }

    #[test]
    fn persistence_failures_hide_the_cause() {
        let cause = StoreError::Unknown("relation \"practice_information\" does not exist".to_string());
        let err: ApiError = PracticeError::FetchFailed(cause).into();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = err.to_json();
        assert_eq!(body, json!({ "error": "Failed to fetch practice information" }));
    }

    #[test]
    fn update_failure_message() {
        let err: ApiError = PracticeError::UpdateFailed(StoreError::AuthFailure("bad password".into())).into();
        assert_eq!(err.to_json(), json!({ "error": "Failed to update practice information" }));
    }

    #[test]
    fn not_found_matches_message_pattern() {
        let err: ApiError = PracticeError::NotFound.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.message().to_lowercase().contains("not found"));
    }

    #[test]
    fn plain_errors_omit_details() {
        let body = ApiError::unauthorized("Unauthorized").to_json();
        assert!(body.get("details").is_none());
    }
}
