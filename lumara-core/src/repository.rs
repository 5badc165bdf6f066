use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::booking::Booking;
use crate::listing::ServiceKind;
use crate::trip::TripPlan;
use crate::user::{Role, User};

/// Repository trait for the identity store
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<User>, Box<dyn std::error::Error + Send + Sync>>;

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<User>, Box<dyn std::error::Error + Send + Sync>>;

    async fn create(
        &self,
        user: &User,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn set_role(
        &self,
        id: Uuid,
        role: Role,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn count_by_role(
        &self,
        role: Role,
    ) -> Result<i64, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for the five listing collections. Documents cross this
/// boundary as raw JSON; typed decoding happens in the layer above.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_available(
        &self,
        kind: ServiceKind,
        limit: i64,
    ) -> Result<Vec<Value>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get(
        &self,
        kind: ServiceKind,
        id: Uuid,
    ) -> Result<Option<Value>, Box<dyn std::error::Error + Send + Sync>>;

    async fn insert(
        &self,
        kind: ServiceKind,
        id: Uuid,
        available: bool,
        doc: &Value,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Full replace by id; false when the id is absent.
    async fn replace(
        &self,
        kind: ServiceKind,
        id: Uuid,
        available: bool,
        doc: &Value,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;

    /// False when the id is absent.
    async fn delete(
        &self,
        kind: ServiceKind,
        id: Uuid,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;

    async fn count_available(
        &self,
        kind: ServiceKind,
    ) -> Result<i64, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for booking records
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(
        &self,
        booking: &Booking,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn get(
        &self,
        id: Uuid,
    ) -> Result<Option<Booking>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>>;

    /// Newest first.
    async fn list_all(
        &self,
        limit: i64,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>>;

    async fn set_payment_intent(
        &self,
        booking_id: Uuid,
        intent_id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Transition payment_status to paid, recording the provider's payment
    /// identifier. Applying it twice is a no-op by construction.
    async fn mark_paid(
        &self,
        booking_id: Uuid,
        provider_payment_id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn count(&self) -> Result<i64, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for stored trip plans
#[async_trait]
pub trait TripPlanRepository: Send + Sync {
    async fn create(
        &self,
        plan: &TripPlan,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
