use std::sync::Arc;
use std::time::Duration;

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

use super::handlers::create_user::create_user;
use super::handlers::current_user::current_user;
use super::handlers::delete_user::delete_user;
use super::handlers::get_user::get_user;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_user::update_user;
use super::middleware::authenticate as auth_middleware;
use super::middleware::authorize as authz_middleware;
use crate::domain::authentication::authorizer::AccessPolicy;
use crate::domain::authentication::authorizer::RoleAuthorizer;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::Role;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub authorizer: Arc<RoleAuthorizer>,
}

/// Role requirements of the protected routes.
///
/// `/api/auth/me` is absent and therefore open to any authenticated caller.
pub fn access_policy() -> AccessPolicy {
    let admin = [Role::Admin];
    AccessPolicy::new()
        .require("GET", "/api/users", &admin)
        .require("POST", "/api/users", &admin)
        .require("GET", "/api/users/:user_id", &admin)
        .require("PATCH", "/api/users/:user_id", &admin)
        .require("DELETE", "/api/users/:user_id", &admin)
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    user_service: Arc<dyn UserServicePort>,
    authorizer: Arc<RoleAuthorizer>,
) -> Router {
    let state = AppState {
        auth_service,
        user_service,
        authorizer,
    };

    let public_routes = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register));

    // Layers run outermost-last: authenticate resolves the principal before
    // authorize reads it.
    let protected_routes = Router::new()
        .route("/api/auth/me", get(current_user))
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/:user_id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authz_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
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

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
