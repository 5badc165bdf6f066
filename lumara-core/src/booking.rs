use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listing::ServiceKind;
use crate::user::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn parse(s: &str) -> Option<PaymentStatus> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            "refunded" => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<BookingStatus> {
        match s {
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub service_type: ServiceKind,
    pub service_id: Uuid,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default = "default_guests")]
    pub guests: i32,
    #[serde(default)]
    pub special_requests: Option<String>,
}

fn default_guests() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_type: ServiceKind,
    /// Reference only; the listing may be deleted later and historical
    /// bookings stay readable with the id dangling.
    pub service_id: Uuid,
    pub service_name: String,
    pub booking_date: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub guests: i32,
    /// Computed once at creation, never recomputed.
    pub total_price: f64,
    pub payment_status: PaymentStatus,
    pub payment_intent_id: Option<String>,
    pub provider_payment_id: Option<String>,
    pub status: BookingStatus,
    pub special_requests: Option<String>,
}

impl Booking {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: Uuid,
        service_type: ServiceKind,
        service_id: Uuid,
        service_name: String,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
        guests: i32,
        total_price: f64,
        special_requests: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            service_type,
            service_id,
            service_name,
            booking_date: Utc::now(),
            start_date,
            end_date,
            guests,
            total_price,
            payment_status: PaymentStatus::Pending,
            payment_intent_id: None,
            provider_payment_id: None,
            status: BookingStatus::Confirmed,
            special_requests,
        }
    }

    /// Owner or admin; anyone else is refused.
    pub fn viewable_by(&self, viewer_id: Uuid, viewer_role: Role) -> bool {
        self.user_id == viewer_id || viewer_role == Role::Admin
    }
}

/// Travel dates arrive as strings; accept full RFC 3339 timestamps or bare
/// dates (taken as midnight UTC), matching what the booking form sends.
pub fn parse_travel_date(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(DateTime::from_naive_utc_and_offset(
            date.and_hms_opt(0, 0, 0).expect("midnight is valid"),
            Utc,
        ));
    }
    Err(format!("invalid date: {}", s))
}
