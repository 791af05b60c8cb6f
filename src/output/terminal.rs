// Colored terminal output for analysis results.
//
// Mirrors the web result view: score and verdict up top, then the detected
// categories colored by severity.

use colored::{ColoredString, Colorize};

use crate::toxicity::models::{Severity, ToxicityResult, Verdict};

/// Display an analysis result in the terminal.
pub fn display_result(result: &ToxicityResult) {
    let verdict = result.verdict();

    println!();
    println!(
        "  {}  {}",
        colorize_verdict(verdict, &format!("{:>3}%", result.score)).bold(),
        colorize_verdict(verdict, verdict.label()),
    );
    println!("  {}", verdict.headline().dimmed());
    println!();

    println!("{}", "=== Breakdown ===".bold());
    let detected: Vec<_> = result.detected().collect();
    if detected.is_empty() {
        println!("  No toxic patterns detected. This message is clean.");
        return;
    }

    for item in detected {
        println!(
            "  {:<20} {}",
            item.category.as_str(),
            colorize_severity(item.severity, item.severity.as_str()),
        );
    }
    println!();
}

fn colorize_verdict(verdict: Verdict, text: &str) -> ColoredString {
    match verdict {
        Verdict::Chill => text.green(),
        Verdict::Mid => text.yellow(),
        Verdict::Toxic => text.red(),
    }
}

fn colorize_severity(severity: Severity, text: &str) -> ColoredString {
    match severity {
        Severity::Low => text.green(),
        Severity::Medium => text.yellow(),
        Severity::High => text.red().bold(),
    }
}
