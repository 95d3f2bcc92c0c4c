// handlers/protected/practice_information.rs - /api/practiceInformation

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Extension, Json,
};

use crate::auth::Session;
use crate::database::models::{PracticeInformation, PracticeInformationRow};
use crate::error::ApiError;
use crate::services::PracticeError;
use crate::state::AppState;

/// GET /api/practiceInformation - the caller's practice information
///
/// `phone_numbers` is returned as an array of `{number, type}` objects.
/// 401 without a session, 404 when nothing has been saved yet.
pub async fn get(
    State(state): State<AppState>,
    session: Option<Extension<Session>>,
) -> Result<Json<PracticeInformation>, ApiError> {
    let session = session.map(|Extension(s)| s);
    let info = state.practice.read(session.as_ref()).await?;
    Ok(Json(info))
}

/// PUT /api/practiceInformation - create or fully replace the caller's practice information
///
/// Expected Input:
/// ```json
/// {
///   "practiceName": "Test Practice",
///   "practiceEmail": "practice@example.com",
///   "timeZone": "America/Chicago",
///   "practiceLogo": "logo.png",
///   "phoneNumbers": [{ "number": "123-456-7890", "type": "main" }],
///   "teleHealth": true
/// }
/// ```
///
/// Returns the stored row; `phone_numbers` is the serialized text as written.
pub async fn put(
    State(state): State<AppState>,
    session: Option<Extension<Session>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<PracticeInformationRow>, ApiError> {
    let session = session.map(|Extension(s)| s);
    let body = body.map_err(|rejection| PracticeError::unreadable_body(session.as_ref(), rejection.body_text()))?;
    let row = state.practice.update(session.as_ref(), &body).await?;
    Ok(Json(row))
}
