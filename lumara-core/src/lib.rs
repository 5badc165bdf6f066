pub mod booking;
pub mod listing;
pub mod payment;
pub mod pricing;
pub mod repository;
pub mod trip;
pub mod user;

pub use booking::{Booking, BookingRequest, BookingStatus, PaymentStatus};
pub use listing::{Car, Event, Hotel, ListingDocument, RealEstate, ServiceKind, ServiceSummary, Tour};
pub use payment::{IntentStatus, PaymentGateway, PaymentIntent};
pub use trip::{TripPlan, TripPlanRequest, TripPlanner};
pub use user::{DuplicateEmail, Role, User};
