use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::body_or_default;
use super::ApiError;
use crate::domain::user::models::SignUpCommand;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn sign_up(
    State(state): State<AppState>,
    body: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let body = body_or_default(body);
    let command = SignUpCommand::new(body.email, body.password).map_err(UserError::from)?;

    state.auth_service.sign_up(command).await?;

    Ok(StatusCode::CREATED)
}

/// HTTP request body for registering a credential (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SignUpRequest {
    email: String,
    password: String,
}
