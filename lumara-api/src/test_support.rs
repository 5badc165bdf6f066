//! In-memory repository fakes for handler-level tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use lumara_core::booking::{Booking, PaymentStatus};
use lumara_core::listing::ServiceKind;
use lumara_core::payment::{IntentStatus, PaymentGateway, PaymentIntent};
use lumara_core::repository::{
    BookingRepository, CatalogRepository, TripPlanRepository, UserRepository,
};
use lumara_core::trip::{TripPlan, TripPlanner};
use lumara_core::user::{DuplicateEmail, Role, User};

use crate::state::{AppState, AuthConfig};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Default)]
pub struct MemoryUsers {
    users: Mutex<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, BoxError> {
        Ok(self.users.lock().unwrap().values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, BoxError> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, user: &User) -> Result<(), BoxError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(Box::new(DuplicateEmail { email: user.email.clone() }));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn set_role(&self, id: Uuid, role: Role) -> Result<(), BoxError> {
        if let Some(user) = self.users.lock().unwrap().get_mut(&id) {
            user.role = role;
        }
        Ok(())
    }

    async fn count_by_role(&self, role: Role) -> Result<i64, BoxError> {
        Ok(self.users.lock().unwrap().values().filter(|u| u.role == role).count() as i64)
    }
}

#[derive(Default)]
pub struct MemoryCatalog {
    docs: Mutex<HashMap<(ServiceKind, Uuid), (bool, Value)>>,
}

#[async_trait]
impl CatalogRepository for MemoryCatalog {
    async fn list_available(&self, kind: ServiceKind, limit: i64) -> Result<Vec<Value>, BoxError> {
        Ok(self
            .docs
            .lock()
            .unwrap()
            .iter()
            .filter(|((k, _), (available, _))| *k == kind && *available)
            .map(|(_, (_, doc))| doc.clone())
            .take(limit as usize)
            .collect())
    }

    async fn get(&self, kind: ServiceKind, id: Uuid) -> Result<Option<Value>, BoxError> {
        Ok(self.docs.lock().unwrap().get(&(kind, id)).map(|(_, doc)| doc.clone()))
    }

    async fn insert(
        &self,
        kind: ServiceKind,
        id: Uuid,
        available: bool,
        doc: &Value,
    ) -> Result<(), BoxError> {
        self.docs.lock().unwrap().insert((kind, id), (available, doc.clone()));
        Ok(())
    }

    async fn replace(
        &self,
        kind: ServiceKind,
        id: Uuid,
        available: bool,
        doc: &Value,
    ) -> Result<bool, BoxError> {
        let mut docs = self.docs.lock().unwrap();
        match docs.get_mut(&(kind, id)) {
            Some(entry) => {
                *entry = (available, doc.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, kind: ServiceKind, id: Uuid) -> Result<bool, BoxError> {
        Ok(self.docs.lock().unwrap().remove(&(kind, id)).is_some())
    }

    async fn count_available(&self, kind: ServiceKind) -> Result<i64, BoxError> {
        Ok(self
            .docs
            .lock()
            .unwrap()
            .iter()
            .filter(|((k, _), (available, _))| *k == kind && *available)
            .count() as i64)
    }
}

#[derive(Default)]
pub struct MemoryBookings {
    bookings: Mutex<HashMap<Uuid, Booking>>,
}

#[async_trait]
impl BookingRepository for MemoryBookings {
    async fn create(&self, booking: &Booking) -> Result<(), BoxError> {
        self.bookings.lock().unwrap().insert(booking.id, booking.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Booking>, BoxError> {
        Ok(self.bookings.lock().unwrap().get(&id).cloned())
    }

    async fn list_for_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<Booking>, BoxError> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.user_id == user_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn list_all(&self, limit: i64) -> Result<Vec<Booking>, BoxError> {
        let mut all: Vec<Booking> = self.bookings.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| b.booking_date.cmp(&a.booking_date));
        all.truncate(limit as usize);
        Ok(all)
    }

    async fn set_payment_intent(&self, booking_id: Uuid, intent_id: &str) -> Result<(), BoxError> {
        if let Some(booking) = self.bookings.lock().unwrap().get_mut(&booking_id) {
            booking.payment_intent_id = Some(intent_id.to_string());
        }
        Ok(())
    }

    async fn mark_paid(
        &self,
        booking_id: Uuid,
        provider_payment_id: &str,
    ) -> Result<(), BoxError> {
        if let Some(booking) = self.bookings.lock().unwrap().get_mut(&booking_id) {
            booking.payment_status = PaymentStatus::Paid;
            booking.provider_payment_id = Some(provider_payment_id.to_string());
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64, BoxError> {
        Ok(self.bookings.lock().unwrap().len() as i64)
    }
}

#[derive(Default)]
pub struct MemoryTrips {
    pub plans: Mutex<Vec<TripPlan>>,
}

#[async_trait]
impl TripPlanRepository for MemoryTrips {
    async fn create(&self, plan: &TripPlan) -> Result<(), BoxError> {
        self.plans.lock().unwrap().push(plan.clone());
        Ok(())
    }
}

/// Gateway whose intents are held in memory; tests preset settlement states.
#[derive(Default)]
pub struct ScriptedGateway {
    pub intents: Mutex<HashMap<String, PaymentIntent>>,
}

impl ScriptedGateway {
    pub fn preset(&self, intent: PaymentIntent) {
        self.intents.lock().unwrap().insert(intent.id.clone(), intent);
    }
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
    async fn create_intent(
        &self,
        booking_id: Uuid,
        _user_id: Uuid,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntent, BoxError> {
        let id = format!("pi_{}", booking_id.simple());
        let intent = PaymentIntent {
            id: id.clone(),
            amount: amount_minor,
            currency: currency.to_string(),
            status: IntentStatus::RequiresPaymentMethod,
            client_secret: Some(format!("{}_secret", id)),
            booking_id: Some(booking_id),
        };
        self.intents.lock().unwrap().insert(id, intent.clone());
        Ok(intent)
    }

    async fn get_intent(&self, intent_id: &str) -> Result<PaymentIntent, BoxError> {
        self.intents
            .lock()
            .unwrap()
            .get(intent_id)
            .cloned()
            .ok_or_else(|| format!("No such payment_intent: {}", intent_id).into())
    }
}

pub struct CannedPlanner {
    pub response: String,
}

impl Default for CannedPlanner {
    fn default() -> Self {
        Self { response: "Day 1: arrive and settle in.".to_string() }
    }
}

#[async_trait]
impl TripPlanner for CannedPlanner {
    async fn generate_itinerary(
        &self,
        _conversation_id: &str,
        _prompt: &str,
    ) -> Result<String, BoxError> {
        Ok(self.response.clone())
    }
}

pub fn admin_user() -> crate::middleware::auth::AdminUser {
    crate::middleware::auth::AdminUser(crate::middleware::auth::CurrentUser {
        id: Uuid::new_v4(),
        email: "admin@example.com".to_string(),
        role: Role::Admin,
    })
}

pub fn test_state() -> AppState {
    state_from_parts(Arc::new(ScriptedGateway::default()), Arc::new(CannedPlanner::default()))
}

pub fn state_from_parts(
    payments: Arc<dyn PaymentGateway>,
    planner: Arc<dyn TripPlanner>,
) -> AppState {
    AppState {
        users: Arc::new(MemoryUsers::default()),
        catalog: Arc::new(MemoryCatalog::default()),
        bookings: Arc::new(MemoryBookings::default()),
        trip_plans: Arc::new(MemoryTrips::default()),
        payments,
        planner,
        auth: AuthConfig { secret: "test-secret".to_string(), expiration: 3600 },
        currency: "usd".to_string(),
    }
}
