use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::body_or_default;
use super::ApiError;
use crate::domain::flag::models::Flag;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn put_flag(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<PutFlagRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let body = body_or_default(body);
    let flag = Flag::new(body.id, body.value)?;

    state.flag_service.put_flag(user.user_id, flag).await?;

    Ok(StatusCode::CREATED)
}

/// HTTP request body for creating or replacing a flag (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PutFlagRequest {
    id: String,
    value: String,
}
