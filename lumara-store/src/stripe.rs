use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

use lumara_core::payment::{IntentStatus, PaymentGateway, PaymentIntent};

use crate::app_config::StripeConfig;

/// Payment-intent bridge speaking Stripe's form-encoded API.
pub struct StripeGateway {
    http: reqwest::Client,
    secret_key: String,
    api_base: String,
}

impl StripeGateway {
    pub fn new(config: &StripeConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key: config.secret_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireIntent {
    id: String,
    amount: i64,
    currency: String,
    status: IntentStatus,
    #[serde(default)]
    client_secret: Option<String>,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

impl WireIntent {
    fn into_intent(self) -> PaymentIntent {
        let booking_id = self
            .metadata
            .get("booking_id")
            .and_then(|v| Uuid::parse_str(v).ok());

        PaymentIntent {
            id: self.id,
            amount: self.amount,
            currency: self.currency,
            status: self.status,
            client_secret: self.client_secret,
            booking_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireError {
    error: WireErrorBody,
}

#[derive(Debug, Deserialize)]
struct WireErrorBody {
    #[serde(default)]
    message: Option<String>,
}

async fn read_intent(
    response: reqwest::Response,
) -> Result<PaymentIntent, Box<dyn std::error::Error + Send + Sync>> {
    if response.status().is_success() {
        let wire: WireIntent = response.json().await?;
        return Ok(wire.into_intent());
    }

    let status = response.status();
    let message = match response.json::<WireError>().await {
        Ok(body) => body.error.message.unwrap_or_else(|| status.to_string()),
        Err(_) => status.to_string(),
    };
    tracing::error!("Stripe request failed ({}): {}", status, message);
    Err(message.into())
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_intent(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntent, Box<dyn std::error::Error + Send + Sync>> {
        let params = [
            ("amount", amount_minor.to_string()),
            ("currency", currency.to_string()),
            ("metadata[platform]", "lumara".to_string()),
            ("metadata[booking_id]", booking_id.to_string()),
            ("metadata[user_id]", user_id.to_string()),
        ];

        let response = self
            .http
            .post(format!("{}/v1/payment_intents", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await?;

        read_intent(response).await
    }

    async fn get_intent(
        &self,
        intent_id: &str,
    ) -> Result<PaymentIntent, Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .http
            .get(format!("{}/v1/payment_intents/{}", self.api_base, intent_id))
            .bearer_auth(&self.secret_key)
            .send()
            .await?;

        read_intent(response).await
    }
}
