//! Text normalization shared by every extraction stage.

use std::sync::LazyLock;

use regex::Regex;

/// Strip tag-like remnants, collapse whitespace runs to one space, and trim.
///
/// Total and deterministic: empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    static TAG_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
    static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

    let without_tags = TAG_RE.replace_all(text, "");
    WS_RE.replace_all(&without_tags, " ").trim().to_string()
}

/// Length in Unicode scalar values, used for every threshold comparison.
pub fn text_len(text: &str) -> usize {
    text.chars().count()
}
