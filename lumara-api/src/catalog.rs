use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use lumara_core::listing::{Car, Event, Hotel, ListingDocument, RealEstate, Tour};
use lumara_core::repository::CatalogRepository;

use crate::error::AppError;
use crate::middleware::auth::AdminUser;
use crate::state::AppState;

/// List endpoints are capped; soft-hidden listings never appear in them.
const LIST_LIMIT: i64 = 100;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/hotels", kind_routes::<Hotel>())
        .nest("/cars", kind_routes::<Car>())
        .nest("/events", kind_routes::<Event>())
        .nest("/tours", kind_routes::<Tour>())
        .nest("/real-estate", kind_routes::<RealEstate>())
}

fn kind_routes<T: ListingDocument>() -> Router<AppState> {
    Router::new()
        .route("/", get(list_available::<T>).post(create_listing::<T>))
        .route(
            "/{id}",
            get(get_listing::<T>).put(replace_listing::<T>).delete(delete_listing::<T>),
        )
}

fn decode<T: ListingDocument>(doc: serde_json::Value) -> Result<T, AppError> {
    // Store documents are schema-validated on the way out; drift is a
    // data-integrity failure, not something to paper over.
    serde_json::from_value(doc)
        .map_err(|e| AppError::InternalServerError(format!("corrupt {} document: {}", T::KIND, e)))
}

async fn list_available<T: ListingDocument>(
    State(state): State<AppState>,
) -> Result<Json<Vec<T>>, AppError> {
    let docs = state
        .catalog
        .list_available(T::KIND, LIST_LIMIT)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    docs.into_iter().map(decode::<T>).collect::<Result<Vec<_>, _>>().map(Json)
}

async fn get_listing<T: ListingDocument>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<T>, AppError> {
    let doc = state
        .catalog
        .get(T::KIND, id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError(format!("{} not found", T::KIND)))?;

    decode::<T>(doc).map(Json)
}

async fn create_listing<T: ListingDocument>(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(mut listing): Json<T>,
) -> Result<Json<T>, AppError> {
    // The server owns identity and creation time, whatever the client sent.
    listing.assign_identity(Uuid::new_v4(), Utc::now());

    let doc = serde_json::to_value(&listing)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    state
        .catalog
        .insert(T::KIND, listing.id(), listing.available(), &doc)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    tracing::info!("Created {} {}", T::KIND, listing.id());
    Ok(Json(listing))
}

async fn replace_listing<T: ListingDocument>(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(mut listing): Json<T>,
) -> Result<Json<T>, AppError> {
    listing.assign_identity(id, Utc::now());

    let doc = serde_json::to_value(&listing)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    let replaced = state
        .catalog
        .replace(T::KIND, id, listing.available(), &doc)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    if !replaced {
        return Err(AppError::NotFoundError(format!("{} not found", T::KIND)));
    }

    Ok(Json(listing))
}

async fn delete_listing<T: ListingDocument>(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = state
        .catalog
        .delete(T::KIND, id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    if !deleted {
        return Err(AppError::NotFoundError(format!("{} not found", T::KIND)));
    }

    Ok(Json(json!({ "message": format!("{} deleted successfully", T::KIND) })))
}
