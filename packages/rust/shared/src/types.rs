//! Core domain types for extracted page sections.

use serde::{Deserialize, Serialize};

/// Title of the synthetic section produced by the fallback extractor.
pub const MAIN_CONTENT_TITLE: &str = "Main Content";

/// Title of the level-0 section collected from `<nav>` lists.
pub const NAVIGATION_TITLE: &str = "Navigation";

/// Title of the level-0 section collected from `<footer>` lists.
pub const FOOTER_TITLE: &str = "Footer Links";

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// A titled, leveled group of extracted content items ("big chunk").
///
/// Content items keep document order. Each is a plain paragraph, a
/// newline-joined list whose lines start with `- `, or a quote starting with `> `.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// 1-based position in the final output. Only meaningful after assembly.
    #[serde(rename = "big_chunk_index")]
    pub index: usize,
    /// Normalized heading text.
    pub title: String,
    /// Heading rank: 1 through 6, or 0 for navigation/footer sections.
    pub level: u8,
    /// Extracted content items ("small chunks").
    #[serde(rename = "small_chunks")]
    pub content_items: Vec<String>,
}

impl Section {
    /// Create a section with the given provisional index.
    pub fn new(index: usize, title: impl Into<String>, level: u8, content_items: Vec<String>) -> Self {
        Self {
            index,
            title: title.into(),
            level,
            content_items,
        }
    }
}

// ---------------------------------------------------------------------------
// ChunkResult
// ---------------------------------------------------------------------------

/// The public result of chunking one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkResult {
    /// Final, assembled sections.
    pub big_chunks: Vec<Section>,
    /// Every heading outside nav/footer as `H<level>: "<title>"`, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_headings: Option<Vec<String>>,
}

impl ChunkResult {
    /// Total number of content items across all sections.
    pub fn item_count(&self) -> usize {
        self.big_chunks.iter().map(|s| s.content_items.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// BoundaryRule
// ---------------------------------------------------------------------------

/// Policy deciding which heading terminates content collection for a section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryRule {
    /// A heading of equal or shallower rank closes the section; deeper
    /// subheadings are absorbed into it.
    #[default]
    Rank,
    /// The next heading of any level closes the section.
    NextHeading,
}

impl BoundaryRule {
    /// Whether a heading at `candidate` level closes a section opened at `current`.
    pub fn closes(self, current: u8, candidate: u8) -> bool {
        match self {
            Self::Rank => candidate <= current,
            Self::NextHeading => true,
        }
    }

    /// Stable lowercase name, as used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rank => "rank",
            Self::NextHeading => "next-heading",
        }
    }
}

impl std::fmt::Display for BoundaryRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BoundaryRule {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rank" => Ok(Self::Rank),
            "next-heading" | "next" | "flat" => Ok(Self::NextHeading),
            other => Err(format!(
                "unknown boundary rule '{other}': expected 'rank' or 'next-heading'"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_serializes_with_public_field_names() {
        let result = ChunkResult {
            big_chunks: vec![Section::new(
                1,
                "Pricing",
                2,
                vec!["Plans start at ten dollars a month.".into()],
            )],
            debug_headings: None,
        };

        let json = serde_json::to_value(&result).expect("serialize");
        let chunk = &json["big_chunks"][0];
        assert_eq!(chunk["big_chunk_index"], 1);
        assert_eq!(chunk["title"], "Pricing");
        assert_eq!(chunk["level"], 2);
        assert_eq!(chunk["small_chunks"][0], "Plans start at ten dollars a month.");
        assert!(json.get("debug_headings").is_none());
    }

    #[test]
    fn chunk_result_roundtrip_keeps_debug_headings() {
        let result = ChunkResult {
            big_chunks: vec![],
            debug_headings: Some(vec!["H1: \"Welcome\"".into()]),
        };
        let json = serde_json::to_string(&result).expect("serialize");
        let parsed: ChunkResult = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, result);
    }

    #[test]
    fn boundary_rule_closing() {
        assert!(BoundaryRule::Rank.closes(2, 2));
        assert!(BoundaryRule::Rank.closes(3, 1));
        assert!(!BoundaryRule::Rank.closes(2, 3));
        assert!(BoundaryRule::NextHeading.closes(2, 3));
    }

    #[test]
    fn boundary_rule_parsing() {
        assert_eq!("rank".parse::<BoundaryRule>(), Ok(BoundaryRule::Rank));
        assert_eq!(
            "Next-Heading".parse::<BoundaryRule>(),
            Ok(BoundaryRule::NextHeading)
        );
        assert!("sideways".parse::<BoundaryRule>().is_err());
        assert_eq!(BoundaryRule::NextHeading.to_string(), "next-heading");
    }

    #[test]
    fn item_count_sums_sections() {
        let result = ChunkResult {
            big_chunks: vec![
                Section::new(1, "One", 1, vec!["a".into(), "b".into()]),
                Section::new(2, "Two", 2, vec!["c".into()]),
            ],
            debug_headings: None,
        };
        assert_eq!(result.item_count(), 3);
    }
}
