use std::sync::Arc;

use lumara_core::payment::PaymentGateway;
use lumara_core::repository::{
    BookingRepository, CatalogRepository, TripPlanRepository, UserRepository,
};
use lumara_core::trip::TripPlanner;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub trip_plans: Arc<dyn TripPlanRepository>,
    pub payments: Arc<dyn PaymentGateway>,
    pub planner: Arc<dyn TripPlanner>,
    pub auth: AuthConfig,
    /// Default currency for payment intents when the client omits one.
    pub currency: String,
}
