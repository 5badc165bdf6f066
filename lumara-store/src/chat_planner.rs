use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use lumara_core::trip::{TripPlanner, PLANNER_SYSTEM_PROMPT};

use crate::app_config::PlannerConfig;

/// Trip-plan generator backed by a chat-completions API.
pub struct ChatPlanner {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl ChatPlanner {
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    /// Fresh conversation identifier per request; the provider sees each
    /// trip plan as an independent session.
    user: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[async_trait]
impl TripPlanner for ChatPlanner {
    async fn generate_itinerary(
        &self,
        conversation_id: &str,
        prompt: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: PLANNER_SYSTEM_PROMPT },
                ChatMessage { role: "user", content: prompt },
            ],
            user: conversation_id,
        };

        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Chat completion failed ({}): {}", status, body);
            return Err(format!("text generation failed: {}", status).into());
        }

        let completion: ChatResponse = response.json().await?;
        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or("text generation returned no choices")?;

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_text_is_taken_from_the_first_choice() {
        let json = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Day 1: arrive."}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ]
        }"#;

        let response: ChatResponse = serde_json::from_str(json).unwrap();
        let text = response.choices.into_iter().next().unwrap().message.content;
        assert_eq!(text, "Day 1: arrive.");
    }

    #[test]
    fn request_shape_matches_the_chat_api() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![
                ChatMessage { role: "system", content: "sys" },
                ChatMessage { role: "user", content: "plan it" },
            ],
            user: "trip-plan-123",
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "plan it");
        assert_eq!(value["user"], "trip-plan-123");
    }
}
