use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::Session;
use crate::database::models::{Clinician, ClinicianInfo, PracticeInformationFields, PracticeInformationRow};
use crate::database::store::{ClinicianResolver, PracticeStore, StoreError};

/// Process-local practice store keyed by clinician id
#[derive(Clone, Default)]
pub struct MemoryPracticeStore {
    rows: Arc<RwLock<HashMap<Uuid, PracticeInformationRow>>>,
}

impl MemoryPracticeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a row directly, bypassing validation
    pub async fn insert(&self, row: PracticeInformationRow) {
        self.rows.write().await.insert(row.clinician_id, row);
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl PracticeStore for MemoryPracticeStore {
    async fn find_one(&self, clinician_id: Uuid) -> Result<Option<PracticeInformationRow>, StoreError> {
        Ok(self.rows.read().await.get(&clinician_id).cloned())
    }

    async fn create_one(
        &self,
        clinician_id: Uuid,
        fields: &PracticeInformationFields,
    ) -> Result<PracticeInformationRow, StoreError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&clinician_id) {
            // Mirrors the unique index on clinician_id
            return Err(StoreError::Unknown(format!(
                "duplicate practice information for clinician {}",
                clinician_id
            )));
        }

        let row = PracticeInformationRow::from_fields(Uuid::new_v4(), clinician_id, fields)?;
        rows.insert(clinician_id, row.clone());
        Ok(row)
    }

    async fn update_many(&self, clinician_id: Uuid, fields: &PracticeInformationFields) -> Result<u64, StoreError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&clinician_id) {
            Some(existing) => {
                *existing = PracticeInformationRow::from_fields(existing.id, clinician_id, fields)?;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// Fixed user -> clinician mapping
#[derive(Clone, Default)]
pub struct MemoryClinicianDirectory {
    by_user: Arc<RwLock<HashMap<Uuid, Clinician>>>,
}

impl MemoryClinicianDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory seeded from `user_id:clinician_id` entries
    pub fn from_entries<S: AsRef<str>>(entries: &[S]) -> Result<Self, StoreError> {
        let mut by_user = HashMap::new();
        for entry in entries {
            let clinician = parse_entry(entry.as_ref())?;
            by_user.insert(clinician.user_id, clinician);
        }
        Ok(Self {
            by_user: Arc::new(RwLock::new(by_user)),
        })
    }

    pub async fn register(&self, clinician: Clinician) {
        self.by_user.write().await.insert(clinician.user_id, clinician);
    }

    pub async fn len(&self) -> usize {
        self.by_user.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.by_user.read().await.is_empty()
    }
}

fn parse_entry(entry: &str) -> Result<Clinician, StoreError> {
    let invalid = || StoreError::Unknown(format!("invalid clinician entry '{}': expected user_id:clinician_id", entry));

    let (user_id, clinician_id) = entry.split_once(':').ok_or_else(invalid)?;
    let user_id = Uuid::parse_str(user_id.trim()).map_err(|_| invalid())?;
    let clinician_id = Uuid::parse_str(clinician_id.trim()).map_err(|_| invalid())?;

    Ok(Clinician {
        id: clinician_id,
        first_name: String::new(),
        last_name: String::new(),
        user_id,
    })
}

#[async_trait]
impl ClinicianResolver for MemoryClinicianDirectory {
    async fn resolve(&self, session: &Session) -> Result<Option<ClinicianInfo>, StoreError> {
        Ok(self
            .by_user
            .read()
            .await
            .get(&session.user_id)
            .cloned()
            .map(ClinicianInfo::from))
    }
}
