// Data models — the request and result types that flow through the analyzer.
//
// Every value here is ephemeral: built for one request, serialized back to
// the caller and dropped. Nothing is persisted.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// MIME type assumed for bare base64 images that carry no data-URI header.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// What the caller submitted: a message, a screenshot, or both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Base64 image, usually a `data:image/...;base64,` URI from the browser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl AnalysisRequest {
    /// A text-only request.
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            image: None,
        }
    }

    /// The message with surrounding whitespace removed, or `None` if it's blank.
    pub fn trimmed_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    /// Parse the image field. A missing or blank image is `Ok(None)`.
    pub fn image_input(&self) -> Result<Option<ImageInput>, ImageError> {
        match self.image.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => ImageInput::parse(raw).map(Some),
        }
    }
}

/// Why an image payload was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("image data URI must look like data:<mime>;base64,<payload>")]
    MalformedDataUri,
    #[error("unsupported image type: {0}")]
    NotAnImage(String),
    #[error("image payload is not valid base64")]
    NotBase64,
    #[error("image payload is empty")]
    Empty,
}

/// A decoded-and-checked image, ready to be attached to a model prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub mime_type: String,
    /// Standard base64, without the data-URI header.
    pub data: String,
}

impl ImageInput {
    /// Parse a `data:<mime>;base64,<payload>` URI or a bare base64 string.
    pub fn parse(raw: &str) -> Result<Self, ImageError> {
        let raw = raw.trim();

        let (mime_type, payload) = match raw.strip_prefix("data:") {
            Some(rest) => {
                let (meta, payload) = rest.split_once(',').ok_or(ImageError::MalformedDataUri)?;
                let mime = meta
                    .strip_suffix(";base64")
                    .ok_or(ImageError::MalformedDataUri)?;
                (mime.to_ascii_lowercase(), payload)
            }
            None => (DEFAULT_IMAGE_MIME.to_string(), raw),
        };

        if !mime_type.starts_with("image/") {
            return Err(ImageError::NotAnImage(mime_type));
        }

        let decoded = STANDARD
            .decode(payload.trim())
            .map_err(|_| ImageError::NotBase64)?;
        if decoded.is_empty() {
            return Err(ImageError::Empty);
        }

        Ok(Self {
            mime_type,
            data: payload.trim().to_string(),
        })
    }

    /// Encode raw image bytes (e.g. a file read from disk).
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Result<Self, ImageError> {
        if !mime_type.starts_with("image/") {
            return Err(ImageError::NotAnImage(mime_type.to_string()));
        }
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        Ok(Self {
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
        })
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// The fixed taxonomy of toxic communication patterns.
///
/// Wire names match the labels the UI renders, including the hyphenated
/// "Passive-aggressive".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ToxicityCategory {
    Insults,
    Threats,
    Sarcasm,
    #[serde(rename = "Passive-aggressive")]
    PassiveAggressive,
    Gaslighting,
    Condescending,
    Manipulation,
    Negativity,
}

impl ToxicityCategory {
    /// All categories in canonical display order.
    pub const ALL: [ToxicityCategory; 8] = [
        ToxicityCategory::Insults,
        ToxicityCategory::Threats,
        ToxicityCategory::Sarcasm,
        ToxicityCategory::PassiveAggressive,
        ToxicityCategory::Gaslighting,
        ToxicityCategory::Condescending,
        ToxicityCategory::Manipulation,
        ToxicityCategory::Negativity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToxicityCategory::Insults => "Insults",
            ToxicityCategory::Threats => "Threats",
            ToxicityCategory::Sarcasm => "Sarcasm",
            ToxicityCategory::PassiveAggressive => "Passive-aggressive",
            ToxicityCategory::Gaslighting => "Gaslighting",
            ToxicityCategory::Condescending => "Condescending",
            ToxicityCategory::Manipulation => "Manipulation",
            ToxicityCategory::Negativity => "Negativity",
        }
    }

    /// Look up a category by its exact wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for ToxicityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How strongly a category shows up. Ordered low < medium < high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the breakdown. `severity` is only meaningful when `detected`
/// is true, but it is always present on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToxicityBreakdownItem {
    #[serde(rename = "type")]
    pub category: ToxicityCategory,
    pub detected: bool,
    pub severity: Severity,
}

impl ToxicityBreakdownItem {
    pub fn detected(category: ToxicityCategory, severity: Severity) -> Self {
        Self {
            category,
            detected: true,
            severity,
        }
    }

    pub fn clear(category: ToxicityCategory) -> Self {
        Self {
            category,
            detected: false,
            severity: Severity::Low,
        }
    }
}

/// The validated analysis returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToxicityResult {
    /// Overall score from 0 (healthy) to 100 (very toxic).
    pub score: u8,
    pub breakdown: Vec<ToxicityBreakdownItem>,
}

impl ToxicityResult {
    /// Breakdown entries the model flagged, in breakdown order.
    pub fn detected(&self) -> impl Iterator<Item = &ToxicityBreakdownItem> {
        self.breakdown.iter().filter(|item| item.detected)
    }

    /// Whether a given category was flagged.
    pub fn is_detected(&self, category: ToxicityCategory) -> bool {
        self.detected().any(|item| item.category == category)
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_score(self.score)
    }
}

/// Score buckets used for the gauge color and the headline verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Chill,
    Mid,
    Toxic,
}

impl Verdict {
    /// 0-33 is Chill, 34-66 is Mid, 67 and up is Toxic.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=33 => Verdict::Chill,
            34..=66 => Verdict::Mid,
            _ => Verdict::Toxic,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Chill => "Chill",
            Verdict::Mid => "Mid",
            Verdict::Toxic => "Toxic",
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Verdict::Chill => "All good vibes",
            Verdict::Mid => "Kinda sus",
            Verdict::Toxic => "Major red flag",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
