use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::flag::errors::FlagError;
use crate::user::errors::UserError;

pub mod delete_flag;
pub mod health;
pub mod list_flags;
pub mod put_flag;
pub mod sign_in;
pub mod sign_up;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorBody { error: message })).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidInput(_) => ApiError::BadRequest(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            UserError::Password(_) | UserError::Token(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<FlagError> for ApiError {
    fn from(err: FlagError) -> Self {
        match err {
            FlagError::InvalidId(_) | FlagError::InvalidFlag => {
                ApiError::BadRequest(err.to_string())
            }
            FlagError::NotFound(_) => ApiError::NotFound(err.to_string()),
            FlagError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// An undecodable body is treated as one with every field empty, so it
/// fails the same validation as a request with blank fields.
fn body_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> T {
    match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Request body rejected");
            T::default()
        }
    }
}
