// Toxicity analysis — prompt construction, model capability, validation.
//
// The ModelCapability trait hides the LLM provider. GeminiModel implements
// it over HTTP; the handler never sees provider types, so another hosted
// model can be swapped in without touching the rest of the pipeline.

pub mod gemini;
pub mod handler;
pub mod models;
pub mod prompt;
pub mod schema;
pub mod traits;
