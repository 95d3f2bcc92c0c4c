use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::Session;
use crate::database::models::{ClinicianInfo, PracticeInformationFields, PracticeInformationRow};

/// Persistence failure kinds. Callers branch on the variant, never on message text.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication with the database failed: {0}")]
    AuthFailure(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Unknown(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound("Record not found".to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed => {
                StoreError::Unavailable(err.to_string())
            }
            sqlx::Error::Io(ref e) => StoreError::Unavailable(e.to_string()),
            sqlx::Error::Tls(ref e) => StoreError::Unavailable(e.to_string()),
            sqlx::Error::Database(ref db_err) => {
                let code = db_err.code().map(|c| c.into_owned()).unwrap_or_default();
                match code.as_str() {
                    // invalid_authorization_specification, invalid_password
                    "28000" | "28P01" => StoreError::AuthFailure(db_err.message().to_string()),
                    // connection_exception class
                    c if c.starts_with("08") => StoreError::Unavailable(db_err.message().to_string()),
                    _ => StoreError::Unknown(db_err.to_string()),
                }
            }
            other => StoreError::Unknown(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Unknown(format!("phone_numbers serialization: {}", err))
    }
}

/// Storage for the one practice information row each clinician may own
#[async_trait]
pub trait PracticeStore: Send + Sync {
    async fn find_one(&self, clinician_id: Uuid) -> Result<Option<PracticeInformationRow>, StoreError>;

    async fn create_one(
        &self,
        clinician_id: Uuid,
        fields: &PracticeInformationFields,
    ) -> Result<PracticeInformationRow, StoreError>;

    /// Overwrite every field on the rows owned by `clinician_id`; returns the affected row count
    async fn update_many(&self, clinician_id: Uuid, fields: &PracticeInformationFields) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Maps an authenticated session onto the clinician it belongs to
#[async_trait]
pub trait ClinicianResolver: Send + Sync {
    async fn resolve(&self, session: &Session) -> Result<Option<ClinicianInfo>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_is_classified() {
        assert!(matches!(StoreError::from(sqlx::Error::RowNotFound), StoreError::NotFound(_)));
    }

    #[test]
    fn pool_exhaustion_is_unavailable() {
        assert!(matches!(StoreError::from(sqlx::Error::PoolTimedOut), StoreError::Unavailable(_)));
        assert!(matches!(StoreError::from(sqlx::Error::PoolClosed), StoreError::Unavailable(_)));
    }

    #[test]
    fn io_errors_are_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(StoreError::from(sqlx::Error::Io(io)), StoreError::Unavailable(_)));
    }

    #[test]
    fn everything_else_is_unknown() {
        let err = sqlx::Error::ColumnNotFound("practice_name".to_string());
        assert!(matches!(StoreError::from(err), StoreError::Unknown(_)));
    }
}
