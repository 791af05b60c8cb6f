// Plain-text share card, the same text the web UI copies to the clipboard.

use crate::toxicity::models::ToxicityResult;

const RULE: &str = "━━━━━━━━━━━━━━━━━━";

/// Footer line pointing people back at the app.
pub const SHARE_FOOTER: &str = "Check your vibes at vibecheck.app";

/// Render a result as a short, copy-pasteable summary.
pub fn share_text(result: &ToxicityResult) -> String {
    let verdict = result.verdict();
    let detected: Vec<&str> = result.detected().map(|i| i.category.as_str()).collect();

    let findings = if detected.is_empty() {
        "No toxic patterns detected.".to_string()
    } else {
        format!("Detected: {}", detected.join(", "))
    };

    format!(
        "VIBE CHECK RESULT\n{RULE}\nScore: {}% ({})\n{}\n\n{findings}\n{RULE}\n{SHARE_FOOTER}",
        result.score,
        verdict.label(),
        verdict.headline(),
    )
}
