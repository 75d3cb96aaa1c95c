//! Pulling the completion text out of a backend payload.

use serde_json::Value;

type Extractor = fn(&Value) -> Option<&str>;

/// Known payload shapes, in priority order.
const EXTRACTORS: &[(&str, Extractor)] = &[
    ("text", direct_text),
    ("response.text", response_text),
    ("candidates[0].content.parts[0].text", candidate_text),
];

fn direct_text(raw: &Value) -> Option<&str> {
    raw.get("text")?.as_str()
}

fn response_text(raw: &Value) -> Option<&str> {
    raw.get("response")?.get("text")?.as_str()
}

fn candidate_text(raw: &Value) -> Option<&str> {
    raw.get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
}

/// First non-empty text found by the extractors.
pub fn extract_text(raw: &Value) -> Option<&str> {
    EXTRACTORS.iter().find_map(|(shape, extract)| {
        let text = extract(raw).filter(|t| !t.is_empty())?;
        tracing::trace!(shape = %shape, "Extracted completion text");
        Some(text)
    })
}

/// Strip one surrounding markdown code fence and the whitespace around it.
///
/// Handles ```` ``` ```` and ```` ```json ```` openers; anything inside the
/// fence is returned as-is.
pub fn strip_code_fence(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix("```") {
        body = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
    }

    if let Some(rest) = body.trim_end().strip_suffix("```") {
        body = rest;
    }

    body.trim()
}
