use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::flag::models::FlagId;
use crate::flag::errors::FlagError;
use crate::flag::errors::FlagIdError;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_flag(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(flag_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let flag_id = FlagId::new(flag_id).map_err(FlagError::from)?;

    state
        .flag_service
        .delete_flag(user.user_id, &flag_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::OK)
}

/// `DELETE /toggles/` with no id segment.
pub async fn delete_flag_without_id() -> ApiError {
    ApiError::from(FlagError::from(FlagIdError::Empty))
}
