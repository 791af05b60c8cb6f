// Google Gemini implementation of the model capability.
//
// Calls the generateContent endpoint with structured output enabled:
// responseMimeType is application/json and responseJsonSchema carries the
// ToxicityResult schema. The model's reply arrives as JSON text inside the
// first candidate, which we parse and hand back unvalidated.
//
// API docs: https://ai.google.dev/api/generate-content

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::traits::{ModelCapability, Prompt};

/// Default Gemini API host.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model — the fast, multimodal tier is plenty for this task.
pub const DEFAULT_MODEL: &str = "gemini-flash-latest";

/// Gemini generateContent client.
pub struct GeminiModel {
    client: Client,
    api_url: String,
    model: String,
    api_key: String,
}

impl GeminiModel {
    /// Create a client for `model` at `api_url`.
    ///
    /// `timeout` bounds the whole request; `None` waits as long as the
    /// provider takes.
    pub fn new(
        api_url: &str,
        model: &str,
        api_key: String,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder().user_agent("vibecheck/0.1");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url, self.model
        )
    }
}

#[async_trait]
impl ModelCapability for GeminiModel {
    async fn invoke(&self, prompt: &Prompt, output_schema: &Value) -> Result<Value> {
        let request = GenerateContentRequest::new(prompt, output_schema);

        debug!(
            model = %self.model,
            has_image = prompt.image.is_some(),
            "Calling Gemini generateContent"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to call Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API returned {}: {}", status, body);
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini API response")?;

        extract_json(&result)
    }
}

/// Pull the structured JSON answer out of a generateContent response.
///
/// Text parts of the first candidate are concatenated (the API may split
/// long output) and parsed as JSON.
pub fn extract_json(response: &GenerateContentResponse) -> Result<Value> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        anyhow::bail!("Gemini blocked the prompt: {reason}");
    }

    let candidate = response
        .candidates
        .first()
        .context("Gemini response contained no candidates")?;

    let text: String = candidate
        .content
        .as_ref()
        .map(|c| c.parts.iter().filter_map(|p| p.text.as_deref()).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        anyhow::bail!(
            "Gemini candidate had no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        );
    }

    serde_json::from_str(text.trim()).context("Gemini output was not valid JSON")
}

// --- Gemini API request/response types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// A single user turn: the prompt text, then the image if there is one.
    pub fn new(prompt: &Prompt, output_schema: &Value) -> Self {
        let mut parts = vec![Part::Text {
            text: prompt.text.clone(),
        }];
        if let Some(image) = &prompt.image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.data.clone(),
                },
            });
        }

        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_json_schema: output_schema.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_json_schema: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}
