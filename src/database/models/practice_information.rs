use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::phone_number::{self, PhoneNumber};

pub const TABLE_NAME: &str = "practice_information";

/// A `practice_information` row exactly as stored; `phone_numbers` is serialized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PracticeInformationRow {
    pub id: Uuid,
    pub clinician_id: Uuid,
    pub practice_name: String,
    pub practice_email: String,
    pub time_zone: String,
    pub practice_logo: Option<String>,
    pub phone_numbers: String,
    pub tele_health: bool,
}

/// Validated field set written by both create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeInformationFields {
    pub practice_name: String,
    pub practice_email: String,
    pub time_zone: String,
    pub practice_logo: Option<String>,
    pub phone_numbers: Vec<PhoneNumber>,
    pub tele_health: bool,
}

/// Read-side view with `phone_numbers` materialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PracticeInformation {
    pub id: Uuid,
    pub clinician_id: Uuid,
    pub practice_name: String,
    pub practice_email: String,
    pub time_zone: String,
    pub practice_logo: Option<String>,
    pub phone_numbers: Vec<PhoneNumber>,
    pub tele_health: bool,
}

impl TryFrom<PracticeInformationRow> for PracticeInformation {
    type Error = serde_json::Error;

    fn try_from(row: PracticeInformationRow) -> Result<Self, Self::Error> {
        let phone_numbers = phone_number::decode(&row.phone_numbers)?;

        Ok(Self {
            id: row.id,
            clinician_id: row.clinician_id,
            practice_name: row.practice_name,
            practice_email: row.practice_email,
            time_zone: row.time_zone,
            practice_logo: row.practice_logo,
            phone_numbers,
            tele_health: row.tele_health,
        })
    }
}

impl PracticeInformationRow {
    /// Row that results from writing `fields` over the row `id` owned by `clinician_id`
    pub fn from_fields(
        id: Uuid,
        clinician_id: Uuid,
        fields: &PracticeInformationFields,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id,
            clinician_id,
            practice_name: fields.practice_name.clone(),
            practice_email: fields.practice_email.clone(),
            time_zone: fields.time_zone.clone(),
            practice_logo: fields.practice_logo.clone(),
            phone_numbers: phone_number::encode(&fields.phone_numbers)?,
            tele_health: fields.tele_health,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> PracticeInformationFields {
        PracticeInformationFields {
            practice_name: "Practice Info".to_string(),
            practice_email: "info@example.com".to_string(),
            time_zone: "America/Denver".to_string(),
            practice_logo: Some("info.png".to_string()),
            phone_numbers: vec![PhoneNumber::new("222-333-4444", "main")],
            tele_health: true,
        }
    }

    #[test]
    fn row_materializes_phone_numbers() {
        let row = PracticeInformationRow::from_fields(Uuid::new_v4(), Uuid::new_v4(), &fields()).unwrap();
        assert_eq!(row.phone_numbers, r#"[{"number":"222-333-4444","type":"main"}]"#);

        let view = PracticeInformation::try_from(row.clone()).unwrap();
        assert_eq!(view.phone_numbers, fields().phone_numbers);
        assert_eq!(view.practice_name, row.practice_name);
    }

    #[test]
    fn view_serializes_snake_case_with_array() {
        let row = PracticeInformationRow::from_fields(Uuid::new_v4(), Uuid::new_v4(), &fields()).unwrap();
        let json = serde_json::to_value(PracticeInformation::try_from(row).unwrap()).unwrap();

        assert_eq!(json["practice_name"], "Practice Info");
        assert_eq!(json["tele_health"], true);
        assert_eq!(json["phone_numbers"][0]["type"], "main");
    }

    #[test]
    fn corrupt_phone_numbers_fail_conversion() {
        let mut row = PracticeInformationRow::from_fields(Uuid::new_v4(), Uuid::new_v4(), &fields()).unwrap();
        row.phone_numbers = "{oops".to_string();
        assert!(PracticeInformation::try_from(row).is_err());
    }
}
