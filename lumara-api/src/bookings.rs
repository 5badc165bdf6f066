use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use lumara_core::booking::{parse_travel_date, Booking, BookingRequest};
use lumara_core::listing::ServiceSummary;
use lumara_core::pricing::{stay_days, total_price};
use lumara_core::repository::{BookingRepository, CatalogRepository};

use crate::error::AppError;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

const MY_BOOKINGS_LIMIT: i64 = 100;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings/{id}", get(get_booking))
        .route("/my-bookings", get(my_bookings))
}

async fn create_booking(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<BookingRequest>,
) -> Result<Json<Booking>, AppError> {
    let start = parse_travel_date(&req.start_date).map_err(AppError::ValidationError)?;
    let end = match &req.end_date {
        Some(raw) => Some(parse_travel_date(raw).map_err(AppError::ValidationError)?),
        None => None,
    };
    if req.guests < 1 {
        return Err(AppError::ValidationError("guests must be at least 1".to_string()));
    }

    let doc = state
        .catalog
        .get(req.service_type, req.service_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError("Service not found".to_string()))?;

    let summary = ServiceSummary::from_document(req.service_type, &doc)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let days = stay_days(start, end);
    let price = total_price(req.service_type, summary.unit_price, days, req.guests);

    let booking = Booking::new(
        user.id,
        req.service_type,
        req.service_id,
        summary.name,
        start,
        end,
        req.guests,
        price,
        req.special_requests,
    );

    state
        .bookings
        .create(&booking)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    tracing::info!(
        "Booking {} created: {} {} for {:.2}",
        booking.id,
        booking.service_type,
        booking.service_id,
        booking.total_price
    );
    Ok(Json(booking))
}

async fn get_booking(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let booking = state
        .bookings
        .get(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError("Booking not found".to_string()))?;

    if !booking.viewable_by(user.id, user.role) {
        return Err(AppError::AuthorizationError("Not authorized to view this booking".to_string()));
    }

    Ok(Json(booking))
}

async fn my_bookings(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = state
        .bookings
        .list_for_user(user.id, MY_BOOKINGS_LIMIT)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(bookings))
}
