// The analysis request handler: input check → prompt → model → validation.
//
// Each call is independent. The model handle is borrowed from the caller,
// so there is no state shared between requests here.

use thiserror::Error;
use tracing::{debug, info};

use super::models::{
    AnalysisRequest, ImageError, ToxicityBreakdownItem, ToxicityCategory, ToxicityResult,
};
use super::prompt::build_prompt;
use super::schema::{output_schema, validate_result, ValidationError};
use super::traits::ModelCapability;
use crate::output::truncate_chars;

/// Everything that can go wrong while analyzing one request.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("a message or an image is required")]
    EmptyInput,
    #[error("invalid image: {0}")]
    InvalidImage(#[from] ImageError),
    #[error("model call failed: {0:#}")]
    Model(anyhow::Error),
    #[error("model output rejected: {0}")]
    Validation(#[from] ValidationError),
}

impl AnalysisError {
    /// True when the caller sent something unusable, as opposed to an
    /// upstream or validation failure on our side.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AnalysisError::EmptyInput | AnalysisError::InvalidImage(_))
    }
}

/// Analyze a message and/or screenshot with the given model.
pub async fn analyze(
    model: &dyn ModelCapability,
    request: &AnalysisRequest,
) -> Result<ToxicityResult, AnalysisError> {
    let message = request.trimmed_message();
    let image = request.image_input()?;

    if message.is_none() && image.is_none() {
        return Err(AnalysisError::EmptyInput);
    }

    debug!(
        message_preview = ?message.map(|m| truncate_chars(m, 50)),
        image_type = ?image.as_ref().map(|i| i.mime_type.as_str()),
        "Building analysis prompt"
    );

    let prompt = build_prompt(message, image);
    let schema = output_schema();

    let raw = model
        .invoke(&prompt, &schema)
        .await
        .map_err(AnalysisError::Model)?;

    let result = complete_breakdown(validate_result(&raw)?);

    info!(
        score = result.score,
        detected = result.detected().count(),
        "Analysis complete"
    );

    Ok(result)
}

/// Normalize a validated breakdown to one entry per category, in canonical
/// order.
///
/// Categories the model left out are reported as not detected. When the model
/// repeats a category, the most severe detected entry wins.
pub fn complete_breakdown(result: ToxicityResult) -> ToxicityResult {
    let breakdown = ToxicityCategory::ALL
        .into_iter()
        .map(|category| {
            result
                .breakdown
                .iter()
                .filter(|item| item.category == category)
                .max_by_key(|item| (item.detected, item.severity))
                .copied()
                .unwrap_or_else(|| ToxicityBreakdownItem::clear(category))
        })
        .collect();

    ToxicityResult {
        score: result.score,
        breakdown,
    }
}
