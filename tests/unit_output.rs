// Unit tests for output helpers: the share card text and truncate_chars
// UTF-8 safety.

use vibecheck::output::share::{share_text, SHARE_FOOTER};
use vibecheck::output::truncate_chars;
use vibecheck::toxicity::models::{
    Severity, ToxicityBreakdownItem, ToxicityCategory, ToxicityResult,
};

fn clean_result(score: u8) -> ToxicityResult {
    ToxicityResult {
        score,
        breakdown: ToxicityCategory::ALL
            .iter()
            .map(|c| ToxicityBreakdownItem::clear(*c))
            .collect(),
    }
}

// ============================================================
// share_text
// ============================================================

#[test]
fn share_card_for_clean_message() {
    let card = share_text(&clean_result(12));
    let expected = "VIBE CHECK RESULT\n\
                    ━━━━━━━━━━━━━━━━━━\n\
                    Score: 12% (Chill)\n\
                    All good vibes\n\
                    \n\
                    No toxic patterns detected.\n\
                    ━━━━━━━━━━━━━━━━━━\n\
                    Check your vibes at vibecheck.app";
    assert_eq!(card, expected);
}

#[test]
fn share_card_lists_detected_categories() {
    let mut result = clean_result(50);
    result.breakdown[2] = ToxicityBreakdownItem::detected(ToxicityCategory::Sarcasm, Severity::Low);
    result.breakdown[3] =
        ToxicityBreakdownItem::detected(ToxicityCategory::PassiveAggressive, Severity::Medium);

    let card = share_text(&result);
    assert!(card.contains("Score: 50% (Mid)"));
    assert!(card.contains("Kinda sus"));
    assert!(card.contains("Detected: Sarcasm, Passive-aggressive"));
    assert!(!card.contains("No toxic patterns"));
    assert!(card.ends_with(SHARE_FOOTER));
}

#[test]
fn share_card_toxic_headline() {
    let card = share_text(&clean_result(100));
    assert!(card.contains("Score: 100% (Toxic)"));
    assert!(card.contains("Major red flag"));
}

// ============================================================
// truncate_chars
// ============================================================

#[test]
fn truncate_short_text_unchanged() {
    assert_eq!(truncate_chars("hello", 10), "hello");
}

#[test]
fn truncate_exact_length_unchanged() {
    assert_eq!(truncate_chars("hello", 5), "hello");
}

#[test]
fn truncate_long_text_gets_ellipsis() {
    assert_eq!(truncate_chars("hello world", 5), "hello...");
}

#[test]
fn truncate_respects_multibyte_chars() {
    assert_eq!(truncate_chars("ugh 🙄🙄🙄 fine", 5), "ugh 🙄...");
}
