//! Boilerplate classification.
//!
//! Noise is a declarative table of independent patterns; a text is noise when
//! any one of them matches. New noise shapes are new rows, not new logic.

use std::sync::LazyLock;

use regex::Regex;

/// One noise pattern with a human-readable description.
pub struct NoisePattern {
    pub pattern: Regex,
    pub description: &'static str,
}

const NOISE_TABLE: &[(&str, &str)] = &[
    (r"^\s*$", "empty or whitespace-only"),
    (
        r"(?i)^(facebook|twitter|instagram|linkedin)$",
        "single social platform name",
    ),
    (r"^\d+share", "share counter"),
    (r"(?i)^comments off", "comments-off marker"),
    (r"^<img", "stray image tag remnant"),
    (r"^\s*\d+\s*$", "digits only"),
    (
        r"(?i)^(facebook twitter pinterest linkedin)$",
        "social link group",
    ),
    (r"(?i)privacy policy$", "privacy policy boilerplate"),
];

static NOISE_PATTERNS: LazyLock<Vec<NoisePattern>> = LazyLock::new(|| {
    NOISE_TABLE
        .iter()
        .map(|(pattern, description)| NoisePattern {
            pattern: Regex::new(pattern).expect("valid noise regex"),
            description,
        })
        .collect()
});

/// All registered noise patterns.
pub fn noise_patterns() -> &'static [NoisePattern] {
    &NOISE_PATTERNS
}

/// Whether `text` is boilerplate that must not appear in the output.
pub fn is_noise(text: &str) -> bool {
    matching_pattern(text).is_some()
}

/// Description of the first pattern that classifies `text` as noise.
pub fn matching_pattern(text: &str) -> Option<&'static str> {
    noise_patterns()
        .iter()
        .find(|p| p.pattern.is_match(text))
        .map(|p| p.description)
}
