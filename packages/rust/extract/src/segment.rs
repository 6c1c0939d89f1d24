//! Heading-based section segmentation.
//!
//! The segmenter walks the document's headings (outside nav/footer) and, for
//! each one, the element siblings that follow it until a closing heading. The
//! first level-1 heading opens an "intro" section with its own, looser rules;
//! every other heading opens a regular section. Accepted content strings are
//! recorded in a per-request [`SeenSet`] so no string is emitted twice.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, trace};

use webchunker_shared::{BoundaryRule, ExtractConfig, Section};

use crate::dom;
use crate::noise::is_noise;
use crate::normalize::{normalize, text_len};

/// Per-request record of every content string already emitted.
pub type SeenSet = HashSet<String>;

/// Intro content must be longer than this.
const INTRO_MIN_LEN: usize = 10;

/// List entries must be longer than this.
const LIST_ITEM_MIN_LEN: usize = 2;

/// Section titles shorter than this are never candidates.
const MIN_TITLE_LEN: usize = 3;

static LIST_ITEM_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("valid selector"));

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Knobs for the segmenter, derived from [`ExtractConfig`].
#[derive(Debug, Clone)]
pub struct SegmentOptions {
    /// Which heading closes a section.
    pub boundary: BoundaryRule,
    /// Fold sections with identical titles into the first one.
    pub merge_duplicate_titles: bool,
    /// One content item per list entry instead of one per list.
    pub split_list_items: bool,
    /// Minimum length a regular section item must exceed.
    pub section_min_len: usize,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self::from(&ExtractConfig::default())
    }
}

impl From<&ExtractConfig> for SegmentOptions {
    fn from(config: &ExtractConfig) -> Self {
        Self {
            boundary: config.boundary,
            merge_duplicate_titles: config.merge_duplicate_titles,
            split_list_items: config.split_list_items,
            section_min_len: config.section_min_len,
        }
    }
}

/// What a walk accepts and how strictly.
struct WalkProfile {
    /// Tags whose whole normalized text becomes one item.
    block_tags: &'static [&'static str],
    /// Whether `<blockquote>` yields a `> `-prefixed item.
    quotes: bool,
    /// Items must be longer than this.
    min_len: usize,
    /// Whether items already emitted by earlier sections are rejected.
    check_global: bool,
}

const INTRO_BLOCK_TAGS: &[&str] = &["p", "div"];
const SECTION_BLOCK_TAGS: &[&str] = &["p", "div", "section", "article"];

// ---------------------------------------------------------------------------
// Headings
// ---------------------------------------------------------------------------

/// A heading outside navigation/footer chrome.
#[derive(Debug, Clone)]
pub struct Heading<'a> {
    pub element: ElementRef<'a>,
    /// Normalized heading text.
    pub title: String,
    pub level: u8,
}

/// Every heading outside nav/footer, in document order.
pub fn collect_headings(doc: &Html) -> Vec<Heading<'_>> {
    dom::all_headings(doc)
        .into_iter()
        .filter(|el| !dom::in_nav_or_footer(el))
        .filter_map(|element| {
            let level = dom::heading_level(&element)?;
            Some(Heading {
                element,
                title: normalize(&dom::element_text(&element)),
                level,
            })
        })
        .collect()
}

/// `H<level>: "<title>"` lines for every heading outside nav/footer.
pub fn heading_analysis(doc: &Html) -> Vec<String> {
    collect_headings(doc)
        .iter()
        .map(|h| format!("H{}: \"{}\"", h.level, h.title))
        .collect()
}

// ---------------------------------------------------------------------------
// Segmentation
// ---------------------------------------------------------------------------

/// Split `doc` into heading-anchored sections.
///
/// Sections come back in document order of their heading, with provisional
/// indices; the assembler assigns the final ones. Returns an empty list when
/// no heading yields content.
#[instrument(skip_all, fields(boundary = %opts.boundary))]
pub fn segment(doc: &Html, opts: &SegmentOptions, seen: &mut SeenSet) -> Vec<Section> {
    let headings = collect_headings(doc);
    let mut sections: Vec<Section> = Vec::new();

    let primary = headings.iter().position(|h| h.level == 1);

    if let Some(idx) = primary {
        let heading = &headings[idx];
        if is_noise(&heading.title) {
            debug!(title = %heading.title, "primary heading is noise, no intro section");
        } else {
            let profile = WalkProfile {
                block_tags: INTRO_BLOCK_TAGS,
                quotes: false,
                min_len: INTRO_MIN_LEN,
                check_global: false,
            };
            let boundary = opts.boundary;
            let items = walk(heading, &profile, opts, seen, |level| match boundary {
                BoundaryRule::Rank => level == 2,
                BoundaryRule::NextHeading => true,
            });
            push_section(&mut sections, &heading.title, 1, items, opts);
        }
    }

    let profile = WalkProfile {
        block_tags: SECTION_BLOCK_TAGS,
        quotes: true,
        min_len: opts.section_min_len,
        check_global: true,
    };

    for (idx, heading) in headings.iter().enumerate() {
        if Some(idx) == primary {
            continue;
        }
        if text_len(&heading.title) < MIN_TITLE_LEN {
            trace!(title = %heading.title, "heading title too short, skipping");
            continue;
        }

        let current = heading.level;
        let boundary = opts.boundary;
        let items = walk(heading, &profile, opts, seen, |level| {
            boundary.closes(current, level)
        });
        push_section(&mut sections, &heading.title, heading.level, items, opts);
    }

    debug!(
        headings = headings.len(),
        sections = sections.len(),
        "segmentation complete"
    );

    sections
}

/// Collect accepted items from the siblings following `heading` until one
/// closes the walk.
///
/// A sibling closes the walk when it is a heading whose level satisfies
/// `closes`, or when it contains such a heading. Non-closing sibling headings
/// are stepped over.
fn walk(
    heading: &Heading<'_>,
    profile: &WalkProfile,
    opts: &SegmentOptions,
    seen: &mut SeenSet,
    closes: impl Fn(u8) -> bool,
) -> Vec<String> {
    let siblings = dom::following_siblings(&heading.element);
    let mut local: HashSet<String> = HashSet::new();
    let mut items = Vec::new();

    let mut cursor = 0;
    while cursor < siblings.len() {
        let sibling = siblings[cursor];
        cursor += 1;

        if let Some(level) = dom::heading_level(&sibling) {
            if closes(level) {
                break;
            }
            continue;
        }
        if dom::contains_heading(&sibling, &closes) {
            break;
        }
        if dom::is_chrome(&sibling) {
            continue;
        }

        for candidate in candidates(&sibling, profile, opts.split_list_items) {
            let accepted = text_len(&candidate) > profile.min_len
                && !local.contains(&candidate)
                && !(profile.check_global && seen.contains(&candidate))
                && !is_noise(&candidate);

            if accepted {
                local.insert(candidate.clone());
                seen.insert(candidate.clone());
                items.push(candidate);
            }
        }
    }

    items
}

/// Turn one sibling element into zero or more candidate items.
fn candidates(el: &ElementRef<'_>, profile: &WalkProfile, split_lists: bool) -> Vec<String> {
    let name = el.value().name();

    if profile.block_tags.contains(&name) {
        return vec![normalize(&dom::element_text(el))];
    }

    match name {
        "ul" | "ol" => {
            let entries = list_entries(el);
            if split_lists {
                entries
            } else if entries.is_empty() {
                Vec::new()
            } else {
                vec![entries.join("\n")]
            }
        }
        "blockquote" if profile.quotes => {
            let text = normalize(&dom::element_text(el));
            if text.is_empty() {
                Vec::new()
            } else {
                vec![format!("> {text}")]
            }
        }
        _ => Vec::new(),
    }
}

/// Qualifying `- `-prefixed entries of a list, in document order.
fn list_entries(list: &ElementRef<'_>) -> Vec<String> {
    list.select(&LIST_ITEM_SEL)
        .map(|li| normalize(&dom::element_text(&li)))
        .filter(|text| text_len(text) > LIST_ITEM_MIN_LEN && !is_noise(text))
        .map(|text| format!("- {text}"))
        .collect()
}

/// Append a section, or fold it into an earlier same-titled one when merging.
fn push_section(
    sections: &mut Vec<Section>,
    title: &str,
    level: u8,
    items: Vec<String>,
    opts: &SegmentOptions,
) {
    if items.is_empty() {
        trace!(title, "heading has no qualifying content");
        return;
    }

    if opts.merge_duplicate_titles {
        if let Some(existing) = sections.iter_mut().find(|s| s.title == title) {
            debug!(title, added = items.len(), "merging into earlier section");
            for item in items {
                if !existing.content_items.contains(&item) {
                    existing.content_items.push(item);
                }
            }
            return;
        }
    }

    let index = sections.len() + 1;
    sections.push(Section::new(index, title, level, items));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(html: &str, opts: &SegmentOptions) -> Vec<Section> {
        let doc = Html::parse_document(html);
        let mut seen = SeenSet::new();
        segment(&doc, opts, &mut seen)
    }

    fn run_default(html: &str) -> Vec<Section> {
        run(html, &SegmentOptions::default())
    }

    #[test]
    fn intro_section_from_primary_heading() {
        let sections = run_default(
            r#"<body>
                <h1>  Welcome to Acme  </h1>
                <p>Acme builds reliable rockets.</p>
                <h2>Pricing Plans</h2>
                <p>Plans start at ten dollars a month.</p>
            </body>"#,
        );

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Welcome to Acme");
        assert_eq!(sections[0].level, 1);
        assert_eq!(sections[0].content_items, vec!["Acme builds reliable rockets."]);
        assert_eq!(sections[1].title, "Pricing Plans");
        assert_eq!(sections[1].level, 2);
        assert_eq!(
            sections[1].content_items,
            vec!["Plans start at ten dollars a month."]
        );
    }

    #[test]
    fn intro_accepts_shorter_items_than_sections() {
        // 12 chars: above the intro threshold, below the section threshold.
        let sections = run_default(
            r#"<body>
                <h1>Intro</h1><p>Short words.</p>
                <h2>Details</h2><p>Short words!</p><p>A much longer sentence here.</p>
            </body>"#,
        );

        assert_eq!(sections[0].content_items, vec!["Short words."]);
        assert_eq!(
            sections[1].content_items,
            vec!["A much longer sentence here."]
        );
    }

    #[test]
    fn intro_only_stops_at_level_two() {
        let sections = run_default(
            r#"<body>
                <h1>Guide</h1>
                <p>Opening paragraph for the guide.</p>
                <h3>Aside</h3>
                <p>Paragraph after a level-three heading.</p>
                <h2>Next</h2>
                <p>Content of the next section here.</p>
            </body>"#,
        );

        assert_eq!(
            sections[0].content_items,
            vec![
                "Opening paragraph for the guide.",
                "Paragraph after a level-three heading."
            ]
        );
        // The h3 content was already emitted by the intro.
        assert!(sections.iter().all(|s| s.title != "Aside"));
    }

    #[test]
    fn rank_boundary_absorbs_deeper_headings() {
        let sections = run_default(
            r#"<body>
                <h2>Features</h2>
                <p>Overview of every feature we ship.</p>
                <h3>Speed</h3>
                <p>Everything loads in milliseconds.</p>
                <h2>Support</h2>
                <p>Email us at any hour of the day.</p>
            </body>"#,
        );

        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Features", "Support"]);
        assert_eq!(
            sections[0].content_items,
            vec![
                "Overview of every feature we ship.",
                "Everything loads in milliseconds."
            ]
        );
    }

    #[test]
    fn next_heading_boundary_is_flat() {
        let opts = SegmentOptions {
            boundary: BoundaryRule::NextHeading,
            ..SegmentOptions::default()
        };
        let sections = run(
            r#"<body>
                <h2>Features</h2>
                <p>Overview of every feature we ship.</p>
                <h3>Speed</h3>
                <p>Everything loads in milliseconds.</p>
            </body>"#,
            &opts,
        );

        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Features", "Speed"]);
        assert_eq!(sections[1].level, 3);
        assert_eq!(
            sections[1].content_items,
            vec!["Everything loads in milliseconds."]
        );
    }

    #[test]
    fn headings_in_nav_and_footer_are_excluded() {
        let sections = run_default(
            r#"<body>
                <nav><h1>Site Menu</h1><p>Navigation blurb that is long enough.</p></nav>
                <h2>Story</h2>
                <p>A real paragraph of page content.</p>
                <footer><h2>Contact Us</h2><p>Footer paragraph that is long enough.</p></footer>
            </body>"#,
        );

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Story");
    }

    #[test]
    fn lone_h1_inside_nav_yields_nothing() {
        let sections = run_default(
            r#"<body><nav><h1>Only Heading</h1><p>Some long paragraph in the nav.</p></nav></body>"#,
        );
        assert!(sections.is_empty());
    }

    #[test]
    fn list_becomes_one_joined_item() {
        let sections = run_default(
            r#"<body>
                <h2>Benefits</h2>
                <ul><li>Free shipping</li><li>  Lifetime warranty </li><li>  </li><li>ok</li></ul>
            </body>"#,
        );

        assert_eq!(
            sections[0].content_items,
            vec!["- Free shipping\n- Lifetime warranty"]
        );
    }

    #[test]
    fn list_of_single_letters_yields_no_section() {
        // Entries must exceed two chars, so nothing in this list qualifies.
        let sections = run_default(
            r#"<body>
                <h2>Letters</h2>
                <ul><li>A</li><li>B</li><li>   </li></ul>
            </body>"#,
        );
        assert!(sections.is_empty());

        let split = run(
            r#"<body><h2>Letters</h2><ul><li>A</li><li>B</li><li>   </li></ul></body>"#,
            &SegmentOptions {
                split_list_items: true,
                ..SegmentOptions::default()
            },
        );
        assert!(split.is_empty());
    }

    #[test]
    fn split_list_items_option() {
        let opts = SegmentOptions {
            split_list_items: true,
            ..SegmentOptions::default()
        };
        let sections = run(
            r#"<body>
                <h2>Benefits</h2>
                <ol><li>Free shipping worldwide</li><li>Lifetime warranty included</li><li>Tiny</li></ol>
            </body>"#,
            &opts,
        );

        assert_eq!(
            sections[0].content_items,
            vec![
                "- Free shipping worldwide",
                "- Lifetime warranty included"
            ]
        );
    }

    #[test]
    fn blockquotes_are_prefixed() {
        let sections = run_default(
            r#"<body>
                <h2>Testimonials</h2>
                <blockquote>  The best tool we have   ever used. </blockquote>
            </body>"#,
        );
        assert_eq!(
            sections[0].content_items,
            vec!["> The best tool we have ever used."]
        );
    }

    #[test]
    fn global_dedup_across_sections() {
        let sections = run_default(
            r#"<body>
                <h2>First Section</h2>
                <p>Repeated paragraph of content.</p>
                <h2>Second Section</h2>
                <p>Repeated paragraph of content.</p>
                <p>Unique paragraph of content.</p>
            </body>"#,
        );

        assert_eq!(sections[0].content_items, vec!["Repeated paragraph of content."]);
        assert_eq!(sections[1].content_items, vec!["Unique paragraph of content."]);
    }

    #[test]
    fn short_or_blank_titles_are_skipped() {
        let sections = run_default(
            r#"<body>
                <h2>Hi</h2><p>Content under a tiny heading.</p>
                <h2>   </h2><p>Content under a blank heading.</p>
            </body>"#,
        );
        assert!(sections.is_empty());
    }

    #[test]
    fn heading_without_content_emits_nothing() {
        let sections = run_default(
            r#"<body><h2>Empty Section</h2><h2>Filled Section</h2><p>Some text that qualifies.</p></body>"#,
        );
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Filled Section");
    }

    #[test]
    fn noise_items_are_rejected() {
        let sections = run_default(
            r#"<body>
                <h2>Share This</h2>
                <p>facebook twitter pinterest linkedin</p>
                <p>Please read our privacy policy</p>
                <p>1234567890123456</p>
                <p>This paragraph is real content.</p>
            </body>"#,
        );
        assert_eq!(
            sections[0].content_items,
            vec!["This paragraph is real content."]
        );
    }

    #[test]
    fn container_holding_closing_heading_ends_walk() {
        let sections = run_default(
            r#"<body>
                <h2>Overview</h2>
                <p>Overview paragraph with detail.</p>
                <section>
                    <h2>Details</h2>
                    <p>Details paragraph with detail.</p>
                </section>
            </body>"#,
        );

        assert_eq!(sections[0].title, "Overview");
        assert_eq!(sections[0].content_items, vec!["Overview paragraph with detail."]);
        assert_eq!(sections[1].title, "Details");
        assert_eq!(sections[1].content_items, vec!["Details paragraph with detail."]);
    }

    #[test]
    fn merge_duplicate_titles_option() {
        let html = r#"<body>
            <h2>Questions</h2><p>How do I reset my password?</p>
            <h2>Answers</h2><p>Use the link on the login page.</p>
            <h2>Questions</h2><p>How do I delete my account?</p>
        </body>"#;

        let separate = run_default(html);
        assert_eq!(separate.len(), 3);

        let opts = SegmentOptions {
            merge_duplicate_titles: true,
            ..SegmentOptions::default()
        };
        let merged = run(html, &opts);
        assert_eq!(merged.len(), 2);
        assert_eq!(
            merged[0].content_items,
            vec![
                "How do I reset my password?",
                "How do I delete my account?"
            ]
        );
    }

    #[test]
    fn later_h1_headings_open_sections() {
        let sections = run_default(
            r#"<body>
                <h1>Part One</h1><p>First part introduction text.</p>
                <h2>Chapter</h2><p>Chapter content for part one.</p>
                <h1>Part Two</h1><p>Second part introduction text.</p>
            </body>"#,
        );
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Part One", "Chapter", "Part Two"]);
    }

    #[test]
    fn seen_set_records_every_emitted_item() {
        let doc = Html::parse_document(
            r#"<body><h1>Title Here</h1><p>Intro paragraph text.</p>
               <h2>Section</h2><p>Section paragraph text.</p></body>"#,
        );
        let mut seen = SeenSet::new();
        let sections = segment(&doc, &SegmentOptions::default(), &mut seen);

        for item in sections.iter().flat_map(|s| &s.content_items) {
            assert!(seen.contains(item));
        }
    }

    #[test]
    fn heading_analysis_lists_visible_headings() {
        let doc = Html::parse_document(
            r#"<body><nav><h2>Menu</h2></nav><h1> Home </h1><h3>Deep dive</h3></body>"#,
        );
        assert_eq!(
            heading_analysis(&doc),
            vec!["H1: \"Home\"", "H3: \"Deep dive\""]
        );
    }
}
