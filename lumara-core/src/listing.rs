use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// The five catalog entity kinds a booking can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Hotel,
    Car,
    Event,
    Tour,
    #[serde(rename = "real-estate")]
    RealEstate,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 5] = [
        ServiceKind::Hotel,
        ServiceKind::Car,
        ServiceKind::Event,
        ServiceKind::Tour,
        ServiceKind::RealEstate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Hotel => "hotel",
            ServiceKind::Car => "car",
            ServiceKind::Event => "event",
            ServiceKind::Tour => "tour",
            ServiceKind::RealEstate => "real-estate",
        }
    }

    pub fn parse(s: &str) -> Option<ServiceKind> {
        match s {
            "hotel" => Some(ServiceKind::Hotel),
            "car" => Some(ServiceKind::Car),
            "event" => Some(ServiceKind::Event),
            "tour" => Some(ServiceKind::Tour),
            "real-estate" => Some(ServiceKind::RealEstate),
            _ => None,
        }
    }

    /// Table backing this kind in the catalog store.
    pub fn table(&self) -> &'static str {
        match self {
            ServiceKind::Hotel => "hotels",
            ServiceKind::Car => "cars",
            ServiceKind::Event => "events",
            ServiceKind::Tour => "tours",
            ServiceKind::RealEstate => "real_estate",
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub district: String,
    pub city: String,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub coordinates: HashMap<String, f64>,
}

/// A typed view over a catalog document.
///
/// Listings are persisted as schema-free documents; this trait is how the
/// generic CRUD surface and the booking workflow get at the handful of
/// fields they actually need without five copies of every handler.
pub trait ListingDocument: Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: ServiceKind;

    fn id(&self) -> Uuid;
    fn available(&self) -> bool;
    fn display_name(&self) -> &str;
    /// The per-kind rate the pricing rule multiplies.
    fn unit_price(&self) -> f64;
    /// Called on create: the server owns identity and creation time.
    fn assign_identity(&mut self, id: Uuid, created_at: DateTime<Utc>);
}

macro_rules! listing_document {
    ($ty:ty, $kind:expr, $name:ident, $price:ident) => {
        impl ListingDocument for $ty {
            const KIND: ServiceKind = $kind;

            fn id(&self) -> Uuid {
                self.id
            }

            fn available(&self) -> bool {
                self.available
            }

            fn display_name(&self) -> &str {
                &self.$name
            }

            fn unit_price(&self) -> f64 {
                self.$price
            }

            fn assign_identity(&mut self, id: Uuid, created_at: DateTime<Utc>) {
                self.id = id;
                self.created_at = created_at;
            }
        }
    };
}

fn default_available() -> bool {
    true
}

fn default_id() -> Uuid {
    Uuid::new_v4()
}

fn default_now() -> DateTime<Utc> {
    Utc::now()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    #[serde(default = "default_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub location: Location,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub room_types: Vec<Value>,
    pub price_per_night: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews_count: i64,
    #[serde(default)]
    pub reviews: Vec<Value>,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub contact_info: HashMap<String, String>,
    #[serde(default = "default_now")]
    pub created_at: DateTime<Utc>,
}

listing_document!(Hotel, ServiceKind::Hotel, name, price_per_night);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    #[serde(default = "default_id")]
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub description: String,
    pub location: Location,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub price_per_day: f64,
    pub transmission: String,
    pub fuel_type: String,
    pub seats: i32,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews_count: i64,
    #[serde(default)]
    pub reviews: Vec<Value>,
    #[serde(default)]
    pub contact_info: HashMap<String, String>,
    #[serde(default = "default_now")]
    pub created_at: DateTime<Utc>,
}

listing_document!(Car, ServiceKind::Car, name, price_per_day);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(default = "default_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub location: Location,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: String,
    pub price: f64,
    pub max_attendees: i32,
    #[serde(default)]
    pub current_attendees: i32,
    pub organizer: String,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews_count: i64,
    #[serde(default)]
    pub reviews: Vec<Value>,
    #[serde(default)]
    pub contact_info: HashMap<String, String>,
    #[serde(default = "default_now")]
    pub created_at: DateTime<Utc>,
}

listing_document!(Event, ServiceKind::Event, name, price);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tour {
    #[serde(default = "default_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub destinations: Vec<Location>,
    pub duration_days: i32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub included: Vec<String>,
    pub price_per_person: f64,
    pub max_group_size: i32,
    pub difficulty_level: String,
    pub tour_type: String,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews_count: i64,
    #[serde(default)]
    pub reviews: Vec<Value>,
    #[serde(default)]
    pub contact_info: HashMap<String, String>,
    #[serde(default = "default_now")]
    pub created_at: DateTime<Utc>,
}

listing_document!(Tour, ServiceKind::Tour, name, price_per_person);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealEstate {
    #[serde(default = "default_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Location,
    pub property_type: String,
    pub listing_type: String,
    pub price: f64,
    #[serde(default)]
    pub bedrooms: Option<i32>,
    #[serde(default)]
    pub bathrooms: Option<i32>,
    #[serde(default)]
    pub area_sqm: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub contact_info: HashMap<String, String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews_count: i64,
    #[serde(default)]
    pub reviews: Vec<Value>,
    #[serde(default = "default_now")]
    pub created_at: DateTime<Utc>,
}

listing_document!(RealEstate, ServiceKind::RealEstate, title, price);

#[derive(Debug, Clone, thiserror::Error)]
#[error("corrupt {kind} document: {reason}")]
pub struct CorruptListing {
    pub kind: ServiceKind,
    pub reason: String,
}

/// The slice of a listing the booking workflow needs: what to call it and
/// what rate to charge. Decoding happens against the full per-kind schema,
/// so a document that has drifted from its schema is rejected here rather
/// than silently priced at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSummary {
    pub name: String,
    pub unit_price: f64,
}

impl ServiceSummary {
    pub fn from_document(kind: ServiceKind, doc: &Value) -> Result<Self, CorruptListing> {
        fn decode<T: ListingDocument>(doc: &Value) -> Result<ServiceSummary, CorruptListing> {
            let listing: T = serde_json::from_value(doc.clone()).map_err(|e| CorruptListing {
                kind: T::KIND,
                reason: e.to_string(),
            })?;
            Ok(ServiceSummary {
                name: listing.display_name().to_string(),
                unit_price: listing.unit_price(),
            })
        }

        match kind {
            ServiceKind::Hotel => decode::<Hotel>(doc),
            ServiceKind::Car => decode::<Car>(doc),
            ServiceKind::Event => decode::<Event>(doc),
            ServiceKind::Tour => decode::<Tour>(doc),
            ServiceKind::RealEstate => decode::<RealEstate>(doc),
        }
    }
}
