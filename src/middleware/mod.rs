//! Route gates
//!
//! `require_auth` resolves the bearer session and installs `CurrentUser`
//! into request extensions. `require_owner` / `require_admin` then run the
//! shared capability check, which re-reads the stored flags rather than
//! trusting anything the client presented. Denial is 401 without a
//! principal and 403 without the capability.

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::models::ApiResponse;
use crate::services::capability::Capability;

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(&request) else {
        return deny(StatusCode::UNAUTHORIZED, "Authentication required");
    };

    match state.auth_service.resolve_session(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "rejecting request with invalid session");
            deny(StatusCode::UNAUTHORIZED, "Authentication required")
        }
    }
}

pub async fn require_owner(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    require_capability(state, request, next, Capability::PropertyOwner).await
}

pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    require_capability(state, request, next, Capability::Admin).await
}

async fn require_capability(
    state: AppState,
    request: Request,
    next: Next,
    capability: Capability,
) -> Response {
    let Some(CurrentUser(user)) = request.extensions().get::<CurrentUser>().cloned() else {
        return deny(StatusCode::UNAUTHORIZED, "Authentication required");
    };

    if state.capability_service.check(user.id, capability).await {
        next.run(request).await
    } else {
        deny(StatusCode::FORBIDDEN, "You do not have access to this resource")
    }
}

fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

fn deny(status: StatusCode, message: &str) -> Response {
    (status, Json(ApiResponse::<()>::err(message))).into_response()
}
