//! Heading-based content segmentation for HTML pages.
//!
//! Turns one parsed page into an ordered list of [`Section`]s: each anchored by
//! a heading and holding the cleaned paragraphs, lists and quotes that belong
//! to it. The stages are:
//! - [`normalize`]: strip tag remnants and collapse whitespace
//! - [`noise`]: declarative boilerplate classification
//! - [`navigation`]: optional level-0 navigation/footer sections
//! - [`segment`]: the heading walk (intro + leveled sections)
//! - [`fallback`]: "Main Content" scan when segmentation finds nothing
//! - [`assemble`]: final filter, global dedup and re-indexing

pub mod assemble;
pub mod dom;
pub mod fallback;
pub mod navigation;
pub mod noise;
pub mod normalize;
pub mod segment;

use scraper::Html;
use tracing::{debug, instrument};

use webchunker_shared::{ChunkResult, ExtractConfig, Section};

pub use assemble::assemble;
pub use fallback::extract_main_content;
pub use navigation::navigation_sections;
pub use noise::{NoisePattern, is_noise};
pub use normalize::normalize;
pub use segment::{SeenSet, SegmentOptions, heading_analysis, segment};

/// Chunk raw HTML text. Never fails: malformed markup is parsed best-effort
/// and a page with no extractable content yields an empty section list.
#[instrument(skip(html, config), fields(html_len = html.len(), boundary = %config.boundary))]
pub fn chunk_html(html: &str, config: &ExtractConfig) -> ChunkResult {
    let doc = Html::parse_document(html);
    chunk_document(&doc, config)
}

/// Chunk an already-parsed document.
pub fn chunk_document(doc: &Html, config: &ExtractConfig) -> ChunkResult {
    let mut seen = SeenSet::new();
    let mut sections: Vec<Section> = Vec::new();

    if config.include_navigation {
        sections.extend(navigation_sections(doc, &mut seen));
    }

    let opts = SegmentOptions::from(config);
    let segmented = segment(doc, &opts, &mut seen);

    if segmented.is_empty() {
        debug!("segmentation produced no sections, trying fallback");
        sections.extend(extract_main_content(doc));
    } else {
        sections.extend(segmented);
    }

    let big_chunks = assemble(sections);
    let debug_headings = config.debug_headings.then(|| heading_analysis(doc));

    debug!(
        sections = big_chunks.len(),
        items = big_chunks.iter().map(|s| s.content_items.len()).sum::<usize>(),
        "chunking complete"
    );

    ChunkResult {
        big_chunks,
        debug_headings,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
