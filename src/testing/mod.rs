//! Fixtures shared by unit and integration tests

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::Session;
use crate::database::models::{Clinician, PracticeInformationFields, PracticeInformationRow};
use crate::database::store::{PracticeStore, StoreError};
use crate::database::{MemoryClinicianDirectory, MemoryPracticeStore};
use crate::services::PracticeService;

/// Which store call a [`FailingStore`] should break
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFault {
    Find,
    Create,
    Update,
}

/// Delegates to a memory store, except for the faulted call
pub struct FailingStore {
    inner: MemoryPracticeStore,
    fault: StoreFault,
}

pub fn failing_store(inner: MemoryPracticeStore, fault: StoreFault) -> Arc<dyn PracticeStore> {
    Arc::new(FailingStore { inner, fault })
}

fn db_fail() -> StoreError {
    StoreError::Unknown("DB fail".to_string())
}

#[async_trait]
impl PracticeStore for FailingStore {
    async fn find_one(&self, clinician_id: Uuid) -> Result<Option<PracticeInformationRow>, StoreError> {
        if self.fault == StoreFault::Find {
            return Err(db_fail());
        }
        self.inner.find_one(clinician_id).await
    }

    async fn create_one(
        &self,
        clinician_id: Uuid,
        fields: &PracticeInformationFields,
    ) -> Result<PracticeInformationRow, StoreError> {
        if self.fault == StoreFault::Create {
            return Err(db_fail());
        }
        self.inner.create_one(clinician_id, fields).await
    }

    async fn update_many(&self, clinician_id: Uuid, fields: &PracticeInformationFields) -> Result<u64, StoreError> {
        if self.fault == StoreFault::Update {
            return Err(db_fail());
        }
        self.inner.update_many(clinician_id, fields).await
    }
}

/// A clinician with a session, wired to a practice service over memory stores
pub struct Fixture {
    pub service: PracticeService,
    pub store: MemoryPracticeStore,
    pub clinician: Clinician,
    pub session: Session,
}

impl Fixture {
    pub async fn new() -> Self {
        let store = MemoryPracticeStore::new();
        Self::build(store.clone(), Arc::new(store)).await
    }

    pub async fn with_fault(fault: StoreFault) -> Self {
        let store = MemoryPracticeStore::new();
        Self::build(store.clone(), failing_store(store, fault)).await
    }

    async fn build(store: MemoryPracticeStore, backing: Arc<dyn PracticeStore>) -> Self {
        let user_id = Uuid::new_v4();
        let clinician = Clinician {
            id: Uuid::new_v4(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            user_id,
        };

        let directory = MemoryClinicianDirectory::new();
        directory.register(clinician.clone()).await;

        let session = Session {
            user_id,
            roles: vec!["ADMIN".to_string()],
            expires_at: chrono::Utc::now() + chrono::Duration::hours(1),
        };

        Self {
            service: PracticeService::new(backing, Arc::new(directory)),
            store,
            clinician,
            session,
        }
    }
}
