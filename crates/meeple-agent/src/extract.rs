// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cleanup of raw model text before JSON decoding.

const FENCE: &str = "```";

/// Returns the JSON payload inside a model reply.
///
/// Surrounding whitespace is removed. A Markdown code fence around the
/// payload, either ```` ```json ```` or a bare ```` ``` ````, is stripped
/// along with its closing fence. Anything else is returned trimmed and
/// untouched; the caller's decoder decides whether it is valid.
pub fn extract_json_payload(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };
    let inner = inner
        .strip_prefix("json")
        .or_else(|| inner.strip_prefix("JSON"))
        .unwrap_or(inner);
    let inner = inner.strip_suffix(FENCE).unwrap_or(inner);
    inner.trim()
}
