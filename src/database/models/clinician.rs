use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "clinician";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Clinician {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub user_id: Uuid,
}

/// Result of resolving a session to the clinician it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicianInfo {
    pub is_clinician: bool,
    pub clinician_id: Uuid,
    pub clinician: Clinician,
}

impl From<Clinician> for ClinicianInfo {
    fn from(clinician: Clinician) -> Self {
        Self {
            is_clinician: true,
            clinician_id: clinician.id,
            clinician,
        }
    }
}
