// handlers/protected/templates.rs - /api/templates

use axum::{extract::Path, Extension, Json};
use serde_json::{json, Value};

use crate::auth::Session;
use crate::error::ApiError;
use crate::services::template_service::{self, TemplatePreview};

/// GET /api/templates - titles available in the template library
pub async fn list(session: Option<Extension<Session>>) -> Result<Json<Value>, ApiError> {
    if session.is_none() {
        return Err(ApiError::unauthorized("Unauthorized"));
    }
    Ok(Json(json!({ "templates": template_service::titles() })))
}

/// GET /api/templates/:title - questionnaire preview for one template
pub async fn show(
    session: Option<Extension<Session>>,
    Path(title): Path<String>,
) -> Result<Json<TemplatePreview>, ApiError> {
    if session.is_none() {
        return Err(ApiError::unauthorized("Unauthorized"));
    }
    Ok(Json(template_service::preview(&title)))
}
