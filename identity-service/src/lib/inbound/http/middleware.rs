use axum::extract::MatchedPath;
use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::authentication::models::Principal;
use crate::domain::authentication::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that resolves the bearer token into a [`Principal`] and adds it
/// to request extensions.
///
/// Missing header, wrong scheme, bad signature, expiry and a deleted subject
/// all produce the same 401.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)
        .map(str::to_string)
        .ok_or_else(|| {
            tracing::debug!(uri = %req.uri(), "Missing or malformed Authorization header");
            ApiError::unauthorized()
        })?;

    let principal = state
        .auth_service
        .authenticate_token(&token)
        .await
        .map_err(ApiError::from)?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Middleware that checks the resolved principal against the route's
/// declared roles. Must run after [`authenticate`].
pub async fn authorize(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = req
        .extensions()
        .get::<Principal>()
        .ok_or_else(ApiError::unauthorized)?;

    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let method = req.method().as_str();

    if !state.authorizer.check(principal, method, &route).is_allowed() {
        tracing::warn!(
            user_id = %principal.user_id,
            role = %principal.role,
            method = %method,
            route = %route,
            "Access denied"
        );
        return Err(ApiError::Forbidden("Forbidden".to_string()));
    }

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Option<&str> {
    let auth_str = req
        .headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
