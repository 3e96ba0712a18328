//! Listing directory, detail, and owner handlers

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::{CurrentUser, MaybeUser};
use crate::handlers::{failure, HandlerResult};
use crate::models::{ApiResponse, Property};
use crate::services::property::{
    detail_view, CreatePropertyRequest, ListPropertiesQuery, PropertyDetail,
    UpdatePropertyRequest,
};

/// Approved listings for the public directory
pub async fn list_properties(
    State(state): State<AppState>,
    Query(query): Query<ListPropertiesQuery>,
) -> HandlerResult<Vec<Property>> {
    match state.property_service.list_public(query).await {
        Ok(properties) => Ok(Json(ApiResponse::ok(properties))),
        Err(e) => Err(failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to list properties: {e}"),
        )),
    }
}

/// Detail view with the subscription gate applied server-side
pub async fn property_detail(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(id): Path<Uuid>,
) -> HandlerResult<PropertyDetail> {
    let property = match state.property_service.get(id).await {
        Ok(Some(property)) => property,
        Ok(None) => return Err(failure(StatusCode::NOT_FOUND, "Property not found")),
        Err(e) => {
            return Err(failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {e}"),
            ))
        }
    };

    let owner = match state.property_service.get_owner(property.owner_id).await {
        Ok(Some(owner)) => owner,
        Ok(None) => return Err(failure(StatusCode::NOT_FOUND, "Property owner not found")),
        Err(e) => {
            return Err(failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {e}"),
            ))
        }
    };

    // Gate-evaluation errors read as "no subscription"
    let unlocked = match &viewer {
        Some(user) => state
            .subscription_service
            .has_active_subscription(user.id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "subscription lookup failed; rendering locked");
                false
            }),
        None => false,
    };

    Ok(Json(ApiResponse::ok(detail_view(property, &owner, unlocked))))
}

pub async fn my_properties(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> HandlerResult<Vec<Property>> {
    match state.property_service.list_for_owner(user.id).await {
        Ok(properties) => Ok(Json(ApiResponse::ok(properties))),
        Err(e) => Err(failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to list properties: {e}"),
        )),
    }
}

/// Create a listing; consumes one paid upload credit
pub async fn create_property(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreatePropertyRequest>,
) -> HandlerResult<Property> {
    if let Err(e) = request.validate() {
        return Err(failure(StatusCode::BAD_REQUEST, format!("Validation error: {e}")));
    }

    match state.property_service.create(user.id, request).await {
        Ok(Some(property)) => Ok(Json(ApiResponse::ok(property))),
        Ok(None) => Err(failure(
            StatusCode::PAYMENT_REQUIRED,
            "A listing upload fee payment is required",
        )),
        Err(e) => Err(failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to create property: {e}"),
        )),
    }
}

pub async fn update_property(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePropertyRequest>,
) -> HandlerResult<Property> {
    if let Err(e) = request.validate() {
        return Err(failure(StatusCode::BAD_REQUEST, format!("Validation error: {e}")));
    }

    match state.property_service.update(user.id, id, request).await {
        Ok(Some(property)) => Ok(Json(ApiResponse::ok(property))),
        Ok(None) => Err(failure(StatusCode::NOT_FOUND, "Property not found")),
        Err(e) => Err(failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to update property: {e}"),
        )),
    }
}

pub async fn delete_property(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> HandlerResult<()> {
    match state.property_service.delete(user.id, id).await {
        Ok(true) => Ok(Json(ApiResponse::ok(()))),
        Ok(false) => Err(failure(StatusCode::NOT_FOUND, "Property not found")),
        Err(e) => Err(failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete property: {e}"),
        )),
    }
}

pub async fn mark_booked(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> HandlerResult<Property> {
    match state.property_service.mark_booked(user.id, id).await {
        Ok(Some(property)) => Ok(Json(ApiResponse::ok(property))),
        Ok(None) => Err(failure(
            StatusCode::CONFLICT,
            "Only an approved listing of yours can be marked booked",
        )),
        Err(e) => Err(failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to update status: {e}"),
        )),
    }
}

pub async fn mark_available(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> HandlerResult<Property> {
    match state.property_service.mark_available(user.id, id).await {
        Ok(Some(property)) => Ok(Json(ApiResponse::ok(property))),
        Ok(None) => Err(failure(
            StatusCode::CONFLICT,
            "Only a booked listing of yours can be marked available",
        )),
        Err(e) => Err(failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to update status: {e}"),
        )),
    }
}

pub async fn upload_property_images(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> HandlerResult<Property> {
    let mut urls = Vec::new();

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

        match state.media_store.save("properties", &file_name, &bytes).await {
            Ok(url) => urls.push(url),
            Err(e) => return Err(failure(StatusCode::BAD_REQUEST, e.to_string())),
        }
    }

    if urls.is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "No image files in request"));
    }

    match state.property_service.append_images(user.id, id, &urls).await {
        Ok(Some(property)) => Ok(Json(ApiResponse::ok(property))),
        Ok(None) => Err(failure(StatusCode::NOT_FOUND, "Property not found")),
        Err(e) => Err(failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to attach images: {e}"),
        )),
    }
}
