use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use axum::extract::Request;
use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use chrono::Utc;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::pipeline::Interceptor;
use crate::inbound::http::pipeline::Next;

/// Extension type to store the authenticated principal in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub issued_at: i64,
}

/// Logs every request on the way in and its outcome on the way out.
pub struct RequestLogger;

#[async_trait]
impl Interceptor for RequestLogger {
    async fn intercept(&self, request: Request, next: Next) -> Response {
        let method = request.method().clone();
        let path = request.uri().path().to_string();
        let started = Instant::now();

        tracing::info!(%method, %path, "Request received");

        let response = next.run(request).await;

        tracing::info!(
            %method,
            %path,
            status = response.status().as_u16(),
            latency_ms = started.elapsed().as_millis(),
            "Request handled"
        );

        response
    }
}

/// Rejects requests without a valid session token and attaches the
/// principal to the ones that carry one.
pub struct Authentication {
    authenticator: Arc<Authenticator>,
}

impl Authentication {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }

    fn verify(&self, request: &Request) -> Result<Claims, Response> {
        let Some(value) = request
            .headers()
            .get(header::AUTHORIZATION)
            .filter(|value| !value.is_empty())
        else {
            tracing::debug!("Missing Authorization header");
            return Err(StatusCode::UNAUTHORIZED.into_response());
        };

        let value = value.to_str().map_err(|_| {
            ApiError::Unauthorized("Invalid Authorization header".to_string()).into_response()
        })?;
        let token = value.strip_prefix("Bearer ").unwrap_or(value);

        self.authenticator
            .validate_token(token, Utc::now().timestamp())
            .map_err(|e| {
                tracing::warn!(error = %e, "Token validation failed");
                ApiError::Unauthorized("Invalid or expired token".to_string()).into_response()
            })
    }
}

#[async_trait]
impl Interceptor for Authentication {
    async fn intercept(&self, mut request: Request, next: Next) -> Response {
        let claims = match self.verify(&request) {
            Ok(claims) => claims,
            Err(response) => return response,
        };

        request.extensions_mut().insert(AuthenticatedUser {
            user_id: UserId(claims.user_id),
            issued_at: claims.issued_at,
        });

        next.run(request).await
    }
}
