use std::sync::Arc;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::delete_flag::delete_flag;
use super::handlers::delete_flag::delete_flag_without_id;
use super::handlers::health::health;
use super::handlers::list_flags::list_flags;
use super::handlers::put_flag::put_flag;
use super::handlers::sign_in::sign_in;
use super::handlers::sign_up::sign_up;
use super::middleware::Authentication;
use super::middleware::RequestLogger;
use super::pipeline::Pipeline;
use crate::domain::flag::ports::FlagServicePort;
use crate::domain::user::ports::AuthServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub flag_service: Arc<dyn FlagServicePort>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    flag_service: Arc<dyn FlagServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        auth_service,
        flag_service,
    };

    let mut pipeline = Pipeline::new();
    pipeline.push(RequestLogger);

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/signup", post(sign_up))
        .route("/auth", post(sign_in))
        .route_layer(pipeline.layer());

    // Everything registered from here on requires a session token.
    pipeline.push(Authentication::new(authenticator));

    let protected_routes = Router::new()
        .route("/toggles", get(list_flags).put(put_flag))
        .route("/toggles/", delete(delete_flag_without_id))
        .route("/toggles/:flag_id", delete(delete_flag))
        .route_layer(pipeline.layer());

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
        )
    });

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
