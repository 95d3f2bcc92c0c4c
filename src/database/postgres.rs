use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::Session;
use crate::database::models::{
    clinician, phone_number, practice_information, Clinician, ClinicianInfo, PracticeInformationFields,
    PracticeInformationRow,
};
use crate::database::store::{ClinicianResolver, PracticeStore, StoreError};

#[derive(Clone)]
pub struct PgPracticeStore {
    pool: PgPool,
}

impl PgPracticeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PracticeStore for PgPracticeStore {
    async fn find_one(&self, clinician_id: Uuid) -> Result<Option<PracticeInformationRow>, StoreError> {
        let sql = format!(
            r#"
            SELECT id, clinician_id, practice_name, practice_email, time_zone,
                   practice_logo, phone_numbers, tele_health
            FROM "{}"
            WHERE clinician_id = $1
            LIMIT 1
            "#,
            practice_information::TABLE_NAME
        );

        let row = sqlx::query_as::<_, PracticeInformationRow>(&sql)
            .bind(clinician_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn create_one(
        &self,
        clinician_id: Uuid,
        fields: &PracticeInformationFields,
    ) -> Result<PracticeInformationRow, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO "{}"
                (id, clinician_id, practice_name, practice_email, time_zone,
                 practice_logo, phone_numbers, tele_health)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, clinician_id, practice_name, practice_email, time_zone,
                      practice_logo, phone_numbers, tele_health
            "#,
            practice_information::TABLE_NAME
        );

        let row = sqlx::query_as::<_, PracticeInformationRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(clinician_id)
            .bind(&fields.practice_name)
            .bind(&fields.practice_email)
            .bind(&fields.time_zone)
            .bind(&fields.practice_logo)
            .bind(phone_number::encode(&fields.phone_numbers)?)
            .bind(fields.tele_health)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    async fn update_many(&self, clinician_id: Uuid, fields: &PracticeInformationFields) -> Result<u64, StoreError> {
        let sql = format!(
            r#"
            UPDATE "{}"
            SET practice_name = $2,
                practice_email = $3,
                time_zone = $4,
                practice_logo = $5,
                phone_numbers = $6,
                tele_health = $7
            WHERE clinician_id = $1
            "#,
            practice_information::TABLE_NAME
        );

        let result = sqlx::query(&sql)
            .bind(clinician_id)
            .bind(&fields.practice_name)
            .bind(&fields.practice_email)
            .bind(&fields.time_zone)
            .bind(&fields.practice_logo)
            .bind(phone_number::encode(&fields.phone_numbers)?)
            .bind(fields.tele_health)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Looks up the clinician linked to the session's user account
#[derive(Clone)]
pub struct PgClinicianResolver {
    pool: PgPool,
}

impl PgClinicianResolver {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClinicianResolver for PgClinicianResolver {
    async fn resolve(&self, session: &Session) -> Result<Option<ClinicianInfo>, StoreError> {
        let sql = format!(
            r#"SELECT id, first_name, last_name, user_id FROM "{}" WHERE user_id = $1 LIMIT 1"#,
            clinician::TABLE_NAME
        );

        let row = sqlx::query_as::<_, Clinician>(&sql)
            .bind(session.user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(ClinicianInfo::from))
    }
}
