//! Pull the JSON-typed literal out of an expected-output N-Quads document.
//!
//! The toRdf JSON-literal tests expect a single statement whose object is a
//! string literal tagged `rdf:JSON`, e.g.
//!
//! ```text
//! _:b0 <http://example.org/vocab#bool> "{\"a\":1}"^^<http://www.w3.org/1999/02/22-rdf-syntax-ns#JSON> .
//! ```
//!
//! [`extract_json_literal`] finds that literal and returns its lexical form
//! with N-Triples string escapes resolved.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

pub const RDF_JSON: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#JSON";

static JSON_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r#" "(.+)"{}"#, regex::escape(&format!("^^<{RDF_JSON}")));
    Regex::new(&pattern).expect("valid regex")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnescapeError {
    #[error("literal ends with a lone backslash")]
    DanglingBackslash,

    #[error("unknown escape sequence: \\{0}")]
    UnknownEscape(char),

    #[error("invalid unicode escape: \\{0}")]
    InvalidUnicode(String),
}

/// Find the first `"..."^^<rdf:JSON>` literal and return it unescaped.
///
/// `Ok(None)` means the text carries no JSON-typed literal.
pub fn extract_json_literal(nquads: &str) -> Result<Option<String>, UnescapeError> {
    let Some(caps) = JSON_LITERAL.captures(nquads) else {
        tracing::debug!(bytes = nquads.len(), "No rdf:JSON literal in N-Quads text");
        return Ok(None);
    };

    let raw = &caps[1];
    let literal = unescape(raw)?;
    tracing::debug!(raw = raw.len(), unescaped = literal.len(), "Extracted rdf:JSON literal");
    Ok(Some(literal))
}

/// Resolve N-Triples string escapes (`ECHAR` and `UCHAR`) in one pass.
pub fn unescape(s: &str) -> Result<String, UnescapeError> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let escaped = chars.next().ok_or(UnescapeError::DanglingBackslash)?;
        match escaped {
            't' => out.push('\t'),
            'b' => out.push('\u{0008}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\u{000C}'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            '\\' => out.push('\\'),
            'u' => out.push(unicode_escape(&mut chars, 'u', 4)?),
            'U' => out.push(unicode_escape(&mut chars, 'U', 8)?),
            other => return Err(UnescapeError::UnknownEscape(other)),
        }
    }

    Ok(out)
}

fn unicode_escape(
    chars: &mut std::str::Chars<'_>,
    marker: char,
    digits: usize,
) -> Result<char, UnescapeError> {
    let hex: String = chars.by_ref().take(digits).collect();
    let invalid = || UnescapeError::InvalidUnicode(format!("{marker}{hex}"));

    if hex.len() != digits || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    u32::from_str_radix(&hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(invalid)
}
