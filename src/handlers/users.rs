//! Profile and subscription-status handlers

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Serialize;
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::handlers::{failure, HandlerResult};
use crate::models::{ApiResponse, Subscription, User};
use crate::services::profile::UpdateProfileRequest;

pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<ApiResponse<User>> {
    Json(ApiResponse::ok(user))
}

pub async fn update_me(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> HandlerResult<User> {
    if let Err(e) = request.validate() {
        return Err(failure(StatusCode::BAD_REQUEST, format!("Validation error: {e}")));
    }

    match state.profile_service.update(user.id, request).await {
        Ok(updated) => Ok(Json(ApiResponse::ok(updated))),
        Err(e) => Err(failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to update profile: {e}"),
        )),
    }
}

pub async fn become_owner(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> HandlerResult<User> {
    match state.profile_service.become_owner(user.id).await {
        Ok(updated) => Ok(Json(ApiResponse::ok(updated))),
        Err(e) => Err(failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to update profile: {e}"),
        )),
    }
}

pub async fn upload_avatar(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> HandlerResult<User> {
    while let Ok(Some(field)) = multipart.next_field().await {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                return Err(failure(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read upload: {e}"),
                ))
            }
        };

        let url = match state.media_store.save("avatars", &file_name, &bytes).await {
            Ok(url) => url,
            Err(e) => return Err(failure(StatusCode::BAD_REQUEST, e.to_string())),
        };

        return match state.profile_service.set_profile_image(user.id, &url).await {
            Ok(updated) => Ok(Json(ApiResponse::ok(updated))),
            Err(e) => Err(failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to update profile: {e}"),
            )),
        };
    }

    Err(failure(StatusCode::BAD_REQUEST, "No image file in request"))
}

/// Subscription gate state for the current principal
#[derive(Debug, Serialize)]
pub struct SubscriptionStatus {
    pub has_active_subscription: bool,
    pub subscription: Option<Subscription>,
}

pub async fn current_subscription(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> HandlerResult<SubscriptionStatus> {
    match state.subscription_service.current_subscription(user.id).await {
        Ok(subscription) => Ok(Json(ApiResponse::ok(SubscriptionStatus {
            has_active_subscription: subscription.is_some(),
            subscription,
        }))),
        Err(e) => Err(failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to load subscription: {e}"),
        )),
    }
}
