use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::Clock;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::access::enforce;
use super::access::AccessPolicy;
use super::handlers::get_details::get_details;
use super::handlers::health::health;
use super::handlers::login::login;
use super::handlers::register::register;
use super::middleware::authenticate;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::account::ports::CredentialStore;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub credential_store: Arc<dyn CredentialStore>,
    pub authenticator: Arc<Authenticator>,
    pub clock: Arc<dyn Clock>,
    pub access_policy: Arc<AccessPolicy>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    credential_store: Arc<dyn CredentialStore>,
    authenticator: Arc<Authenticator>,
    clock: Arc<dyn Clock>,
    access_policy: AccessPolicy,
) -> Router {
    let state = AppState {
        account_service,
        credential_store,
        authenticator,
        clock,
        access_policy: Arc::new(access_policy),
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            // Headers are left out: the Authorization header carries a credential.
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    // The layer added last runs first: authentication precedes enforcement.
    Router::new()
        .route("/api/user/register", post(register))
        .route("/api/user/login", post(login))
        .route("/api/user/details", get(get_details))
        .route("/health", get(health))
        .route_layer(middleware::from_fn_with_state(state.clone(), enforce))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
