//! HTTP client for the hosted generative language API.
//!
//! Only the `generateContent` call is used: one prompt in, one completion out,
//! optionally with a system instruction and a JSON response mode.

use super::{GenerationRequest, TextGenerator};
use crate::config::Config;
use crate::errors::{AIError, AppResult};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// A text part of a content block.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// A content block.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

/// Request body for content generation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Response from content generation.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().map(|p| p.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Client for the generative language API.
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: Client,
}

impl GeminiClient {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the API (e.g., "https://generativelanguage.googleapis.com")
    /// * `model` - Model name (e.g., "gemini-2.0-flash")
    /// * `api_key` - API key; `None` makes every call fail with `AIError::MissingApiKey`
    /// * `timeout` - Request timeout
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(
                    "Failed to build HTTP client with a {:?} timeout, using defaults: {}",
                    timeout, e
                );
                Client::new()
            });
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            client,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.gemini_base_url,
            &config.model,
            config.gemini_api_key.clone(),
            config.request_timeout,
        )
    }
}

impl TextGenerator for GeminiClient {
    /// Sends a generation request.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No API key is configured
    /// - The API is not reachable or times out
    /// - The model is not found
    /// - The API returns an error status, an unreadable body or an empty completion
    fn generate(&self, request: &GenerationRequest) -> AppResult<String> {
        let api_key = self.api_key.as_deref().ok_or(AIError::MissingApiKey)?;
        debug!("Sending generation request with model: {}", self.model);

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            system_instruction: request.system_instruction.as_ref().map(|text| Content {
                role: None,
                parts: vec![Part { text: text.clone() }],
            }),
            generation_config: request.json_response.then_some(GenerationConfig {
                response_mime_type: "application/json",
            }),
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .map_err(AIError::Unreachable)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();

            if status.as_u16() == 404 {
                return Err(AIError::ModelNotFound(self.model.clone()).into());
            }

            return Err(
                AIError::InvalidResponse(format!("HTTP {}: {}", status, error_text)).into(),
            );
        }

        let generated: GenerateResponse = response.json().map_err(|e| {
            AIError::InvalidResponse(format!("Failed to parse generation response: {}", e))
        })?;

        let text = generated
            .text()
            .ok_or_else(|| AIError::InvalidResponse("Empty completion".to_string()))?;

        debug!("Received completion ({} chars)", text.chars().count());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[test]
    fn test_client_creation() {
        let client = GeminiClient::new(
            "http://localhost:8080/",
            "test-model",
            None,
            Duration::from_secs(1),
        );
        assert_eq!(client.base_url, "http://localhost:8080");
        assert_eq!(client.model, "test-model");
    }

    #[test]
    fn test_missing_api_key_fails_without_network() {
        let client = GeminiClient::new(
            "http://127.0.0.1:1",
            "test-model",
            None,
            Duration::from_secs(1),
        );
        let result = client.generate(&GenerationRequest::new("hello"));
        assert!(matches!(result, Err(AppError::AI(AIError::MissingApiKey))));
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: "hi".to_string(),
                }],
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part {
                    text: "be kind".to_string(),
                }],
            }),
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
            }),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be kind");
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert!(json["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn test_response_text_joins_parts_and_rejects_blank() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello "},{"text":"there"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("Hello there"));

        let blank: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#)
                .unwrap();
        assert!(blank.text().is_none());

        let none: GenerateResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(none.text().is_none());
    }
}
