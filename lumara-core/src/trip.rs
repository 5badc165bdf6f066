use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const PLANNER_SYSTEM_PROMPT: &str = "You are an expert travel assistant for the Lumara \
marketplace. Create detailed, practical trip plans focused on authentic local experiences: \
accommodation, transportation, tours, events, food and culture. Keep recommendations concrete \
and include rough costs.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlanRequest {
    pub query: String,
    pub destinations: Vec<String>,
    pub duration_days: i32,
    #[serde(default)]
    pub budget: Option<f64>,
}

/// Stored plan: echoed inputs plus the generator's response kept verbatim.
/// The itinerary is an opaque blob; nothing downstream parses it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlan {
    pub id: Uuid,
    pub user_query: String,
    pub destinations: Vec<String>,
    pub duration_days: i32,
    pub budget: Option<f64>,
    pub itinerary: String,
    pub created_at: DateTime<Utc>,
}

impl TripPlan {
    pub fn new(request: TripPlanRequest, itinerary: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_query: request.query,
            destinations: request.destinations,
            duration_days: request.duration_days,
            budget: request.budget,
            itinerary,
            created_at: Utc::now(),
        }
    }
}

/// The fixed prompt template the generator is called with.
pub fn build_prompt(request: &TripPlanRequest) -> String {
    let budget = match request.budget {
        Some(b) => format!("${}", b),
        None => "Not specified".to_string(),
    };

    format!(
        "Plan a {duration}-day trip with the following details:\n\
         - Destinations: {destinations}\n\
         - Budget: {budget}\n\
         - Traveller's request: {query}\n\
         \n\
         Please provide:\n\
         1. A day-by-day itinerary\n\
         2. Recommended accommodation in each location\n\
         3. Transportation suggestions\n\
         4. Must-visit attractions and activities\n\
         5. Local food and cultural experiences\n\
         6. Estimated costs for each activity",
        duration = request.duration_days,
        destinations = request.destinations.join(", "),
        budget = budget,
        query = request.query,
    )
}

#[async_trait]
pub trait TripPlanner: Send + Sync {
    /// Submit a prompt under a fresh conversation id and return the raw
    /// completion text.
    async fn generate_itinerary(
        &self,
        conversation_id: &str,
        prompt: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_all_inputs() {
        let request = TripPlanRequest {
            query: "beaches and history".to_string(),
            destinations: vec!["Freeport".to_string(), "Baia Alta".to_string()],
            duration_days: 5,
            budget: Some(1200.0),
        };

        let prompt = build_prompt(&request);
        assert!(prompt.contains("Plan a 5-day trip"));
        assert!(prompt.contains("Freeport, Baia Alta"));
        assert!(prompt.contains("$1200"));
        assert!(prompt.contains("beaches and history"));
    }

    #[test]
    fn missing_budget_is_spelled_out() {
        let request = TripPlanRequest {
            query: "quiet week".to_string(),
            destinations: vec!["Kembe".to_string()],
            duration_days: 7,
            budget: None,
        };

        assert!(build_prompt(&request).contains("Budget: Not specified"));
    }

    #[test]
    fn plan_echoes_request_and_keeps_response_verbatim() {
        let request = TripPlanRequest {
            query: "family trip".to_string(),
            destinations: vec!["Freeport".to_string()],
            duration_days: 3,
            budget: None,
        };
        let raw = "Day 1: arrive.\nDay 2: beach.\nDay 3: depart.".to_string();

        let plan = TripPlan::new(request, raw.clone());
        assert_eq!(plan.itinerary, raw);
        assert_eq!(plan.duration_days, 3);
        assert_eq!(plan.destinations, vec!["Freeport".to_string()]);
    }
}
