//! Generative Language API client.

use super::{TextGenError, TextGenerator, ValidationFinding};
use crate::domain::Vehicle;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Text generator backed by the Gemini generateContent endpoint. Single-shot:
/// one request per call, no retry; callers apply the fallback policy.
#[derive(Debug, Clone)]
pub struct GeminiTextGenerator {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiTextGenerator {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
            model,
        }
    }

    async fn generate(
        &self,
        prompt: String,
        json_response: bool,
    ) -> Result<String, TextGenError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let mut payload = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });
        if json_response {
            payload["generationConfig"] = serde_json::json!({
                "responseMimeType": "application/json"
            });
        }

        debug!("Requesting generation from model {}", self.model);
        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| TextGenError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TextGenError::Http {
                status: status.as_u16(),
                message: "generateContent request failed".to_string(),
            });
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| TextGenError::Parse(e.to_string()))?;

        body.pointer("/candidates/0/content/parts/0/text")
            .and_then(|t| t.as_str())
            .map(|t| t.trim().to_string())
            .ok_or_else(|| TextGenError::Parse("missing candidate text".to_string()))
    }
}

#[async_trait]
impl TextGenerator for GeminiTextGenerator {
    async fn vehicle_summary(&self, vehicle: &Vehicle) -> Result<String, TextGenError> {
        let blob = serde_json::to_string(vehicle)
            .map_err(|e| TextGenError::Parse(e.to_string()))?;
        let prompt = format!(
            "Generate a compelling, professional auction summary for this vehicle: {}. \
             Highlight its value proposition for a bidder. Keep it under 100 words.",
            blob
        );
        self.generate(prompt, false).await
    }

    async fn validate_lots(
        &self,
        rows: &[serde_json::Value],
    ) -> Result<Vec<ValidationFinding>, TextGenError> {
        let blob = serde_json::to_string(rows)
            .map_err(|e| TextGenError::Parse(e.to_string()))?;
        let prompt = format!(
            "Act as a data validator. Check these auction records for inconsistencies \
             (e.g. unrealistic prices, invalid fuel types, mismatched years/models): {}. \
             Return a JSON list of identified issues.",
            blob
        );
        let text = self.generate(prompt, true).await?;
        serde_json::from_str(&text).map_err(|e| TextGenError::Parse(e.to_string()))
    }
}
