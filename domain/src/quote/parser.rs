//! Quote parsing from generator responses.
//!
//! Extracts validated [`Quote`] values from raw model text. The generator is
//! asked for pure JSON but routinely wraps the payload in explanatory prose,
//! so extraction locates the first balanced `{...}` or `[...]` substring and
//! parses that. Extraction failure yields an empty result, never an error —
//! callers treat "no valid quotes" as an ordinary fetch failure.
//!
//! All types referenced ([`Quote`], [`Origin`]) are domain types, making this
//! pure domain logic.

use crate::quote::entities::{Origin, Quote};

/// Maximum number of quotes accepted from a single batch response.
pub const MAX_BATCH_SIZE: usize = 10;

/// Locate the first balanced JSON object or array substring in raw text.
///
/// Scans from the first `{` or `[`, tracking nesting depth while skipping
/// string literals and escape sequences. Returns `None` when no opener exists
/// or the payload is never balanced (truncated response).
pub fn extract_json_payload(raw: &str) -> Option<&str> {
    let start = raw.find(['{', '['])?;
    let bytes = raw.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&raw[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Validate a single candidate record into a [`Quote`].
///
/// Requires a non-blank `quote` field and a `source` field that is exactly
/// `"AI"` or `"Human"`. An optional `author` field is attached subject to the
/// quote invariants (human origin only, never the literal "none").
pub fn parse_quote_record(value: &serde_json::Value) -> Option<Quote> {
    let text = value.get("quote")?.as_str()?;
    let origin = Origin::from_label(value.get("source")?.as_str()?)?;

    let mut quote = Quote::try_new(text, origin)?;
    if let Some(author) = value.get("author").and_then(|v| v.as_str()) {
        quote = quote.with_author(author);
    }
    Some(quote)
}

/// Parse a batch of quotes from raw generator text.
///
/// Accepts three payload shapes (the generator is not consistent):
/// 1. A bare JSON array of records
/// 2. An object holding a `quotes` array
/// 3. A single record object
///
/// Records failing validation are dropped; order is preserved; the result is
/// truncated to [`MAX_BATCH_SIZE`]. Anything unparseable yields an empty vec.
pub fn parse_quote_batch(raw: &str) -> Vec<Quote> {
    let Some(payload) = extract_json_payload(raw) else {
        return Vec::new();
    };
    let Ok(parsed) = serde_json::from_str::<serde_json::Value>(payload) else {
        return Vec::new();
    };

    let records: Vec<&serde_json::Value> = match &parsed {
        serde_json::Value::Array(items) => items.iter().collect(),
        serde_json::Value::Object(_) => match parsed.get("quotes").and_then(|v| v.as_array()) {
            Some(items) => items.iter().collect(),
            None => vec![&parsed],
        },
        _ => return Vec::new(),
    };

    records
        .into_iter()
        .filter_map(parse_quote_record)
        .take(MAX_BATCH_SIZE)
        .collect()
}

/// Parse a single quote from raw generator text.
///
/// Single-fetch responses are expected to be one record, but a generator that
/// answers with an array anyway is tolerated — the first valid record wins.
pub fn parse_quote_single(raw: &str) -> Option<Quote> {
    parse_quote_batch(raw).into_iter().next()
}
