use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use lumara_core::booking::Booking;
use lumara_core::listing::ServiceKind;
use lumara_core::repository::{BookingRepository, CatalogRepository, UserRepository};
use lumara_core::user::Role;

use crate::error::AppError;
use crate::middleware::auth::AdminUser;
use crate::state::AppState;

const ADMIN_BOOKINGS_LIMIT: i64 = 1000;
const RECENT_BOOKINGS: usize = 5;

#[derive(Debug, Serialize)]
struct PlatformStats {
    total_hotels: i64,
    total_cars: i64,
    total_events: i64,
    total_tours: i64,
    total_properties: i64,
    total_users: i64,
    total_bookings: i64,
    recent_bookings: Vec<Booking>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/bookings", get(all_bookings))
        .route("/admin/stats", get(platform_stats))
}

async fn all_bookings(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = state
        .bookings
        .list_all(ADMIN_BOOKINGS_LIMIT)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(bookings))
}

async fn platform_stats(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<PlatformStats>, AppError> {
    let count = |kind: ServiceKind| state.catalog.count_available(kind);

    let total_hotels = count(ServiceKind::Hotel)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    let total_cars = count(ServiceKind::Car)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    let total_events = count(ServiceKind::Event)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    let total_tours = count(ServiceKind::Tour)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    let total_properties = count(ServiceKind::RealEstate)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let total_users = state
        .users
        .count_by_role(Role::User)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    let total_bookings = state
        .bookings
        .count()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let mut recent_bookings = state
        .bookings
        .list_all(RECENT_BOOKINGS as i64)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    recent_bookings.truncate(RECENT_BOOKINGS);

    Ok(Json(PlatformStats {
        total_hotels,
        total_cars,
        total_events,
        total_tours,
        total_properties,
        total_users,
        total_bookings,
        recent_bookings,
    }))
}
