pub mod app_config;
pub mod booking_repo;
pub mod catalog_repo;
pub mod chat_planner;
pub mod database;
pub mod stripe;
pub mod trip_repo;
pub mod user_repo;

pub use booking_repo::PgBookingRepository;
pub use catalog_repo::PgCatalogRepository;
pub use chat_planner::ChatPlanner;
pub use database::DbClient;
pub use stripe::StripeGateway;
pub use trip_repo::PgTripPlanRepository;
pub use user_repo::PgUserRepository;
