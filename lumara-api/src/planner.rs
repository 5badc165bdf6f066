use axum::{extract::State, routing::post, Json, Router};
use uuid::Uuid;

use lumara_core::repository::TripPlanRepository;
use lumara_core::trip::{build_prompt, TripPlan, TripPlanRequest, TripPlanner};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/ai-trip-planner", post(plan_trip))
}

/// Open endpoint: planning a trip does not require an account.
async fn plan_trip(
    State(state): State<AppState>,
    Json(req): Json<TripPlanRequest>,
) -> Result<Json<TripPlan>, AppError> {
    if req.destinations.is_empty() {
        return Err(AppError::ValidationError("at least one destination is required".to_string()));
    }
    if req.duration_days < 1 {
        return Err(AppError::ValidationError("duration_days must be at least 1".to_string()));
    }

    let conversation_id = format!("trip-plan-{}", Uuid::new_v4());
    let prompt = build_prompt(&req);

    let itinerary = state
        .planner
        .generate_itinerary(&conversation_id, &prompt)
        .await
        .map_err(|e| AppError::ExternalServiceError(format!("Trip generation failed: {}", e)))?;

    let plan = TripPlan::new(req, itinerary);
    state
        .trip_plans
        .create(&plan)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    tracing::info!("Trip plan {} generated for {} destination(s)", plan.id, plan.destinations.len());
    Ok(Json(plan))
}
