use axum::http::{header, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod error;
pub mod middleware;
pub mod payments;
pub mod planner;
pub mod state;

#[cfg(test)]
pub mod test_support;

pub use state::AppState;

/// The full HTTP surface, mounted under `/api`.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_origin(Any);

    let api = Router::new()
        .merge(auth::routes())
        .merge(catalog::routes())
        .merge(bookings::routes())
        .merge(payments::routes())
        .merge(planner::routes())
        .merge(admin::routes());

    Router::new()
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
