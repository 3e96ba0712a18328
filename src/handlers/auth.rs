//! Signup, login, and session handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::{AuthError, AuthTokenResponse, LoginRequest, MaybeUser, SignupRequest};
use crate::handlers::{failure, HandlerResult};
use crate::models::{ApiResponse, User};

pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> HandlerResult<AuthTokenResponse> {
    if let Err(e) = request.validate() {
        return Err(failure(StatusCode::BAD_REQUEST, format!("Validation error: {e}")));
    }

    match state.auth_service.signup(request).await {
        Ok(response) => Ok(Json(ApiResponse::ok(response))),
        Err(e) => Err(auth_failure(e)),
    }
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> HandlerResult<AuthTokenResponse> {
    if let Err(e) = request.validate() {
        return Err(failure(StatusCode::BAD_REQUEST, format!("Validation error: {e}")));
    }

    match state.auth_service.login(request).await {
        Ok(response) => Ok(Json(ApiResponse::ok(response))),
        Err(e) => Err(auth_failure(e)),
    }
}

/// Current principal, or null when no session resolves
pub async fn session(MaybeUser(user): MaybeUser) -> Json<ApiResponse<User>> {
    Json(ApiResponse {
        success: true,
        data: user,
        error: None,
    })
}

fn auth_failure<T>(error: AuthError) -> (StatusCode, Json<ApiResponse<T>>) {
    match error {
        AuthError::EmailTaken => failure(StatusCode::CONFLICT, error.to_string()),
        AuthError::InvalidCredentials | AuthError::InvalidSession | AuthError::Token(_) => {
            failure(StatusCode::UNAUTHORIZED, error.to_string())
        }
        AuthError::Hash(_) | AuthError::Database(_) => {
            tracing::error!(error = %error, "auth operation failed");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
        }
    }
}
