use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::toxicity::gemini::{DEFAULT_API_URL, DEFAULT_MODEL};

/// Central configuration loaded from environment variables.
///
/// The API key comes from the environment (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    pub gemini_api_key: String,
    /// Gemini API host (defaults to https://generativelanguage.googleapis.com)
    pub gemini_api_url: String,
    /// Model name passed to generateContent (VIBECHECK_MODEL)
    pub model: String,
    /// Upper bound on a single model call. Unset means wait indefinitely.
    pub model_timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default except the API key, which is only checked
    /// by `require_model` so `schema` works without one.
    pub fn load() -> Result<Self> {
        let model_timeout = match env::var("VIBECHECK_MODEL_TIMEOUT_SECS") {
            Ok(raw) => Some(parse_timeout(&raw)?),
            Err(_) => None,
        };

        Ok(Self {
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_api_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            model: env::var("VIBECHECK_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            model_timeout,
        })
    }

    /// Check that the Gemini API key is configured.
    /// Call this before any operation that talks to the model.
    pub fn require_model(&self) -> Result<()> {
        if self.gemini_api_key.is_empty() {
            anyhow::bail!(
                "GEMINI_API_KEY not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}

/// Parse a timeout in whole seconds. Zero is rejected: leave the variable
/// unset to disable the timeout instead.
fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("VIBECHECK_MODEL_TIMEOUT_SECS must be a number, got {raw:?}"))?;
    if secs == 0 {
        anyhow::bail!("VIBECHECK_MODEL_TIMEOUT_SECS must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout_accepts_seconds() {
        assert_eq!(parse_timeout("30").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_timeout(" 5 ").unwrap(), Duration::from_secs(5));
    }

    #[test]
    fn test_parse_timeout_rejects_zero_and_garbage() {
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
        assert!(parse_timeout("-3").is_err());
    }

    #[test]
    fn test_require_model_needs_key() {
        let config = Config {
            gemini_api_key: String::new(),
            gemini_api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            model_timeout: None,
        };
        assert!(config.require_model().is_err());

        let config = Config {
            gemini_api_key: "key".to_string(),
            ..config
        };
        assert!(config.require_model().is_ok());
    }
}
