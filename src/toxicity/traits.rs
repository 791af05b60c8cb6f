// Model capability trait — the seam between the analyzer and the LLM provider.
//
// The analyzer only needs "given a prompt and a schema, give me JSON back".
// GeminiModel implements it over HTTP; tests plug in canned models.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use super::models::ImageInput;

/// A fully built prompt: the instruction text plus an optional attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub image: Option<ImageInput>,
}

/// A hosted model that can answer a prompt with schema-constrained JSON.
///
/// Implementations must be async because every real provider is an HTTP API.
/// The returned value is untrusted: callers validate it before use.
#[async_trait]
pub trait ModelCapability: Send + Sync {
    async fn invoke(&self, prompt: &Prompt, output_schema: &Value) -> Result<Value>;
}
