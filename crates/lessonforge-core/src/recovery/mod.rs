//! Structured-value recovery from generator output
//!
//! The external generator returns free-form text. Sometimes it is clean
//! JSON; more often the payload is wrapped in prose, markdown fences, or
//! arrives with comments and trailing commas. This module recovers the
//! structured value behind that noise with an ordered list of fallback
//! strategies, each total and independently testable.

mod parser;

pub use parser::{extract_all, parse, ParseOutcome};
