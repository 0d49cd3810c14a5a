//! Two-stage decoding of AI-generated alternate layouts: payload extraction, then structural
//! parsing into [`AlternateLayout`].

use crate::model::Page;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// The alternate layout document: one entry per report page, aligned by index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlternateLayout {
    pub pages: Vec<Page>,
}

#[derive(Debug, thiserror::Error)]
pub enum LayoutDecodeError {
    #[error("alternate layout is empty after removing code fences")]
    Empty,

    #[error("alternate layout is not a valid `{{ \"pages\": [...] }}` document: {0}")]
    Json(#[from] serde_json::Error),
}

fn fenced_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```[ \t]*[A-Za-z0-9_+.-]*[ \t]*\r?\n?(.*?)```").unwrap())
}

fn leading_fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^```[ \t]*[A-Za-z0-9_+.-]*[ \t]*(?:\r?\n|$)").unwrap())
}

fn trailing_fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```[ \t]*$").unwrap())
}

/// Removes Markdown code fences (with an optional language tag) and surrounding whitespace.
///
/// If the text contains a complete fenced block, the body of the first one is returned and any
/// prose around it is dropped. Otherwise a lone opening fence line and/or a lone closing fence
/// are removed, which covers truncated responses. Unfenced text is only trimmed.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    if let Some(body) = fenced_block_re().captures(trimmed).and_then(|c| c.get(1)) {
        return body.as_str().trim();
    }

    let mut rest = trimmed;
    if let Some(m) = leading_fence_re().find(rest) {
        rest = &rest[m.end()..];
    }
    if let Some(m) = trailing_fence_re().find(rest) {
        rest = &rest[..m.start()];
    }
    rest.trim()
}

/// Narrows fence-free text to the JSON object it carries.
///
/// Models sometimes answer with a sentence before or after the object and no fences at all. When
/// the text does not already start with `{`, the slice from the first `{` to the last `}` is
/// used.
pub fn extract_layout_payload(raw: &str) -> &str {
    let body = strip_code_fences(raw);
    if body.starts_with('{') {
        return body;
    }
    match (body.find('{'), body.rfind('}')) {
        (Some(start), Some(end)) if start < end => &body[start..=end],
        _ => body,
    }
}

pub fn decode_alternate_layout(raw: &str) -> Result<AlternateLayout, LayoutDecodeError> {
    let payload = extract_layout_payload(raw);
    if payload.is_empty() {
        return Err(LayoutDecodeError::Empty);
    }
    Ok(serde_json::from_str(payload)?)
}
