use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Provider-side intent lifecycle. Anything the provider adds later maps to
/// `Unknown` rather than failing the decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    RequiresCapture,
    Processing,
    Succeeded,
    Canceled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Provider's identifier (e.g. pi_123).
    pub id: String,
    /// Minor currency units.
    pub amount: i64,
    pub currency: String,
    pub status: IntentStatus,
    pub client_secret: Option<String>,
    /// Booking reference carried through provider metadata.
    pub booking_id: Option<Uuid>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Stage a payment with the provider; the returned intent carries the
    /// client-side confirmation token.
    async fn create_intent(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntent, Box<dyn std::error::Error + Send + Sync>>;

    /// Re-query the provider for the intent's settlement state.
    async fn get_intent(
        &self,
        intent_id: &str,
    ) -> Result<PaymentIntent, Box<dyn std::error::Error + Send + Sync>>;
}
