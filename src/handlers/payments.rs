//! Payment workflow handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::handlers::{failure, HandlerResult};
use crate::models::{ApiResponse, Payment, PaymentType};
use crate::services::payment::{
    CheckoutOrder, CreateOrderRequest, PaymentFailedRequest, VerifyOutcome,
    VerifyPaymentRequest,
};

/// Create (or reuse) a pending gateway order; the amount is decided here,
/// never taken from the client
pub async fn create_order(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateOrderRequest>,
) -> HandlerResult<CheckoutOrder> {
    if request.purpose == PaymentType::Subscription && request.plan_type.is_none() {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            "plan_type is required for subscription purchases",
        ));
    }

    match state.payment_service.create_order(&user, request).await {
        Ok(order) => Ok(Json(ApiResponse::ok(order))),
        Err(e) => {
            tracing::error!(user_id = %user.id, error = %e, "order creation failed");
            Err(failure(
                StatusCode::BAD_GATEWAY,
                "Failed to create payment order",
            ))
        }
    }
}

/// Verify a completed checkout; access is granted only on a signature match
pub async fn verify_payment(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<VerifyPaymentRequest>,
) -> HandlerResult<VerifyOutcome> {
    if let Err(e) = request.validate() {
        return Err(failure(StatusCode::BAD_REQUEST, format!("Validation error: {e}")));
    }

    match state.payment_service.verify(user.id, request).await {
        Ok(outcome) if outcome.success => Ok(Json(ApiResponse::ok(outcome))),
        Ok(_) => Err(failure(
            StatusCode::BAD_REQUEST,
            "Payment verification failed",
        )),
        Err(e) => Err(failure(
            StatusCode::BAD_REQUEST,
            format!("Payment verification failed: {e}"),
        )),
    }
}

/// Widget-reported failure or dismissal
pub async fn payment_failed(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<PaymentFailedRequest>,
) -> HandlerResult<()> {
    if let Err(e) = request.validate() {
        return Err(failure(StatusCode::BAD_REQUEST, format!("Validation error: {e}")));
    }

    match state
        .payment_service
        .mark_failed(user.id, &request.razorpay_order_id)
        .await
    {
        Ok(true) => Ok(Json(ApiResponse::ok(()))),
        Ok(false) => Err(failure(
            StatusCode::NOT_FOUND,
            "No pending payment found for this order",
        )),
        Err(e) => Err(failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to record payment failure: {e}"),
        )),
    }
}

pub async fn list_payments(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> HandlerResult<Vec<Payment>> {
    match state.payment_service.list_for_user(user.id).await {
        Ok(payments) => Ok(Json(ApiResponse::ok(payments))),
        Err(e) => Err(failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to list payments: {e}"),
        )),
    }
}
