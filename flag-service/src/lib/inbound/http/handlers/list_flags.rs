use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::flag::models::Flag;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_flags(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<FlagData>>, ApiError> {
    state
        .flag_service
        .list_flags(user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|flags| ApiSuccess::new(StatusCode::OK, flags.iter().map(FlagData::from).collect()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagData {
    pub id: String,
    pub value: String,
}

impl From<&Flag> for FlagData {
    fn from(flag: &Flag) -> Self {
        Self {
            id: flag.id.as_str().to_string(),
            value: flag.value.clone(),
        }
    }
}
