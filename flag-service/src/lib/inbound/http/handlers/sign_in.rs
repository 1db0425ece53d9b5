use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::body_or_default;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::SignInCommand;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn sign_in(
    State(state): State<AppState>,
    body: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<ApiSuccess<SignInResponseData>, ApiError> {
    let body = body_or_default(body);
    let command = SignInCommand::new(body.email, body.password).map_err(UserError::from)?;

    state
        .auth_service
        .sign_in(command)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, SignInResponseData { jwt: token.0 }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SignInRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignInResponseData {
    pub jwt: String,
}
