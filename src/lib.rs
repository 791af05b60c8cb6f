// Vibe Check: LLM-backed toxicity scoring for messages and screenshots.
//
// This is the library root. The toxicity module holds the analysis core
// (prompt, model capability, response validation); output and web are the
// terminal and HTTP surfaces built on top of it.

pub mod config;
pub mod output;
pub mod toxicity;

#[cfg(feature = "web")]
pub mod web;
