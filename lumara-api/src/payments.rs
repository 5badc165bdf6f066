use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use lumara_core::payment::{IntentStatus, PaymentGateway};
use lumara_core::repository::BookingRepository;

use crate::error::AppError;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CreateIntentRequest {
    booking_id: Uuid,
}

#[derive(Debug, Serialize)]
struct CreateIntentResponse {
    client_secret: String,
    payment_intent_id: String,
}

#[derive(Debug, Deserialize)]
struct ConfirmRequest {
    payment_intent_id: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payments/create-intent", post(create_intent))
        .route("/payments/confirm", post(confirm_payment))
}

async fn create_intent(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateIntentRequest>,
) -> Result<Json<CreateIntentResponse>, AppError> {
    let booking = state
        .bookings
        .get(req.booking_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError("Booking not found".to_string()))?;

    // Owner only. Admins can read any booking but never open a charge on
    // someone else's behalf.
    if booking.user_id != user.id {
        return Err(AppError::AuthorizationError("Not authorized to pay for this booking".to_string()));
    }

    // Gateways charge in minor units.
    let amount_minor = (booking.total_price * 100.0).round() as i64;

    let intent = state
        .payments
        .create_intent(booking.id, user.id, amount_minor, &state.currency)
        .await
        .map_err(|e| AppError::ExternalServiceError(e.to_string()))?;

    let client_secret = intent
        .client_secret
        .clone()
        .ok_or_else(|| AppError::ExternalServiceError("Gateway returned no client secret".to_string()))?;

    state
        .bookings
        .set_payment_intent(booking.id, &intent.id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    tracing::info!("Payment intent {} opened for booking {}", intent.id, booking.id);
    Ok(Json(CreateIntentResponse { client_secret, payment_intent_id: intent.id }))
}

async fn confirm_payment(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(req): Json<ConfirmRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let intent = state
        .payments
        .get_intent(&req.payment_intent_id)
        .await
        .map_err(|e| AppError::ExternalServiceError(e.to_string()))?;

    if intent.status != IntentStatus::Succeeded {
        // Nothing is recorded for an unsettled intent; the client may retry
        // confirmation after the gateway settles.
        return Ok(Json(json!({
            "status": "failed",
            "message": "Payment not completed",
        })));
    }

    let booking_id = intent
        .booking_id
        .ok_or_else(|| AppError::ExternalServiceError("Intent carries no booking reference".to_string()))?;

    state
        .bookings
        .get(booking_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError("Booking not found".to_string()))?;

    state
        .bookings
        .mark_paid(booking_id, &intent.id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    tracing::info!("Booking {} settled by intent {}", booking_id, intent.id);
    Ok(Json(json!({
        "status": "success",
        "booking_id": booking_id,
        "message": "Payment confirmed",
    })))
}
