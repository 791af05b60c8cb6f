// Prompt construction for the toxicity analysis request.

use super::models::{ImageInput, Severity, ToxicityCategory};
use super::traits::Prompt;

/// Build the directive prompt for a message, a screenshot, or both.
///
/// The category list and severity levels are spelled out verbatim so the
/// model's labels line up with the output schema enums.
pub fn build_prompt(message: Option<&str>, image: Option<ImageInput>) -> Prompt {
    let subject = match (message, image.is_some()) {
        (Some(_), true) => {
            "the message below together with the attached screenshot. \
             Read any visible text or conversation in the screenshot and treat it \
             as part of the message"
        }
        (None, true) => {
            "the attached screenshot. Read any visible text or conversation in the \
             image and analyze that text"
        }
        _ => "the message below",
    };

    let categories = ToxicityCategory::ALL
        .iter()
        .map(|c| format!("- {c}"))
        .collect::<Vec<_>>()
        .join("\n");
    let severities = Severity::ALL
        .iter()
        .map(Severity::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    let mut text = format!(
        "Analyze {subject} for toxic communication patterns.\n\n\
         Give an overall toxicity score from 0 (completely healthy) to 100 (extremely toxic).\n\n\
         Then report every one of these categories exactly once, with whether it was \
         detected and its severity ({severities}). Use severity \"low\" for categories \
         that were not detected.\n\
         {categories}\n\n\
         Respond only with JSON containing \"score\" and \"breakdown\" fields."
    );

    if let Some(message) = message {
        text.push_str("\n\nMessage:\n\"\"\"\n");
        text.push_str(message);
        text.push_str("\n\"\"\"");
    }

    Prompt { text, image }
}
