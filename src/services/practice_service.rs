use std::sync::Arc;
use thiserror::Error;

use crate::auth::Session;
use crate::database::models::{ClinicianInfo, PracticeInformation, PracticeInformationFields, PracticeInformationRow};
use crate::database::store::{ClinicianResolver, PracticeStore, StoreError};
use crate::error::FieldErrors;
use crate::services::validation::validate_update_payload;
use crate::types::Operation;

#[derive(Debug, Error)]
pub enum PracticeError {
    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Clinician not found")]
    ClinicianNotFound,

    #[error("Practice information not found")]
    NotFound,

    #[error("Invalid request payload")]
    InvalidPayload(FieldErrors),

    #[error("Failed to fetch practice information: {0}")]
    FetchFailed(#[source] StoreError),

    #[error("Failed to update practice information: {0}")]
    UpdateFailed(#[source] StoreError),
}

impl PracticeError {
    /// A PUT body that could not be buffered. A missing session still wins.
    pub fn unreadable_body(session: Option<&Session>, reason: impl Into<String>) -> Self {
        if session.is_none() {
            return PracticeError::Unauthenticated;
        }
        let mut errors = FieldErrors::new();
        errors.insert("body".to_string(), reason.into());
        PracticeError::InvalidPayload(errors)
    }
}

/// Read and upsert of the per-clinician practice information record
#[derive(Clone)]
pub struct PracticeService {
    store: Arc<dyn PracticeStore>,
    clinicians: Arc<dyn ClinicianResolver>,
}

impl PracticeService {
    pub fn new(store: Arc<dyn PracticeStore>, clinicians: Arc<dyn ClinicianResolver>) -> Self {
        Self { store, clinicians }
    }

    pub fn store(&self) -> &Arc<dyn PracticeStore> {
        &self.store
    }

    /// Fetch the caller's record with `phone_numbers` materialized
    pub async fn read(&self, session: Option<&Session>) -> Result<PracticeInformation, PracticeError> {
        let session = session.ok_or(PracticeError::Unauthenticated)?;
        let clinician = self
            .resolve_clinician(session)
            .await
            .map_err(PracticeError::FetchFailed)?
            .ok_or(PracticeError::ClinicianNotFound)?;

        let row = self
            .store
            .find_one(clinician.clinician_id)
            .await
            .map_err(PracticeError::FetchFailed)?
            .ok_or(PracticeError::NotFound)?;

        tracing::debug!(
            "{} practice information {} for clinician {}",
            Operation::Select,
            row.id,
            clinician.clinician_id
        );

        PracticeInformation::try_from(row).map_err(|e| PracticeError::FetchFailed(e.into()))
    }

    /// Create the caller's record if absent, otherwise overwrite every field.
    ///
    /// `body` is the raw request body; it is only parsed once the session is known
    /// so that unauthenticated callers always see the same rejection.
    pub async fn update(&self, session: Option<&Session>, body: &[u8]) -> Result<PracticeInformationRow, PracticeError> {
        let session = session.ok_or(PracticeError::Unauthenticated)?;

        let payload: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
            let mut errors = FieldErrors::new();
            errors.insert("body".to_string(), format!("must be valid JSON: {}", e));
            PracticeError::InvalidPayload(errors)
        })?;
        let fields = validate_update_payload(&payload).map_err(PracticeError::InvalidPayload)?;

        let clinician = self
            .resolve_clinician(session)
            .await
            .map_err(PracticeError::UpdateFailed)?
            .ok_or(PracticeError::ClinicianNotFound)?;

        let (operation, row) = self
            .upsert(clinician.clinician_id, &fields)
            .await
            .map_err(PracticeError::UpdateFailed)?;

        tracing::info!(
            "{} practice information {} for clinician {}",
            operation,
            row.id,
            clinician.clinician_id
        );
        Ok(row)
    }

    async fn upsert(
        &self,
        clinician_id: uuid::Uuid,
        fields: &PracticeInformationFields,
    ) -> Result<(Operation, PracticeInformationRow), StoreError> {
        let Some(existing) = self.store.find_one(clinician_id).await? else {
            let row = self.store.create_one(clinician_id, fields).await?;
            return Ok((Operation::Create, row));
        };

        let affected = self.store.update_many(clinician_id, fields).await?;
        if affected == 0 {
            // Row disappeared between the lookup and the write
            tracing::warn!("Practice information for clinician {} vanished before update", clinician_id);
            let row = self.store.create_one(clinician_id, fields).await?;
            return Ok((Operation::Create, row));
        }

        let row = PracticeInformationRow::from_fields(existing.id, clinician_id, fields)?;
        Ok((Operation::Update, row))
    }

    async fn resolve_clinician(&self, session: &Session) -> Result<Option<ClinicianInfo>, StoreError> {
        let info = self.clinicians.resolve(session).await?.filter(|info| info.is_clinician);
        if info.is_none() {
            tracing::debug!("User {} is not linked to a clinician", session.user_id);
        }
        Ok(info)
    }
}
