//! Word-triple parser: shape validation only.
//!
//! Parsing never resolves a triple to a position; that requires the
//! geocoding collaborator and is invoked only by the conversion engine.

use std::sync::OnceLock;

use regex::Regex;

use crate::coord::{Format, WordTriple};

use super::ParseError;

fn words_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Three non-empty alphanumeric tokens, dot separated, nothing else.
        Regex::new(r"^([A-Za-z0-9]+)\.([A-Za-z0-9]+)\.([A-Za-z0-9]+)$").unwrap()
    })
}

/// Parses `a.b.c` word-triple text.
pub fn parse(raw: &str) -> Result<WordTriple, ParseError> {
    let caps = words_pattern()
        .captures(raw)
        .ok_or(ParseError::GrammarMismatch(Format::Words))?;

    Ok(WordTriple {
        words: [caps[1].to_string(), caps[2].to_string(), caps[3].to_string()],
        resolved: None,
    })
}
