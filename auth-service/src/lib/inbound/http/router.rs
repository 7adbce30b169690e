use std::sync::Arc;
use std::time::Duration;

use auth::TokenCodec;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::change_password::change_password;
use super::handlers::signin::signin;
use super::handlers::signout::signout;
use super::handlers::signup::signup;
use super::handlers::validate_token::validate_token;
use crate::domain::account::ports::AuthenticationPort;

/// State shared by all handlers: the authentication use-cases plus the
/// codec that checks presented tokens.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthenticationPort>,
    pub tokens: Arc<TokenCodec>,
}

pub fn create_router(auth: Arc<dyn AuthenticationPort>, tokens: Arc<TokenCodec>) -> Router {
    let state = AppState { auth, tokens };

    // Headers are kept out of the span: Authorization values must not end
    // up in the logs
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = ?request.method(),
                uri = ?request.uri(),
                version = ?request.version(),
            )
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = ?response.status(),
                    latency = ?latency,
                    "Request processed"
                );
            },
        );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/auth/signin", post(signin))
        .route("/auth/signup", post(signup))
        .route("/auth/signout", post(signout))
        .route("/auth/validate", get(validate_token))
        .route("/auth/change-password", post(change_password))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
