//! Fallback extraction for pages without usable heading structure.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::debug;

use webchunker_shared::{MAIN_CONTENT_TITLE, Section};

use crate::dom;
use crate::noise::is_noise;
use crate::normalize::{normalize, text_len};

/// Fallback items must be longer than this.
const FALLBACK_MIN_LEN: usize = 20;

/// Main-content containers, tried in priority order.
const CONTAINER_SELECTORS: &[&str] = &[
    "main",
    "article",
    r#"[role="main"]"#,
    ".content",
    ".post-content",
    ".entry-content",
];

static CONTAINERS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    CONTAINER_SELECTORS
        .iter()
        .map(|css| Selector::parse(css).expect("valid selector"))
        .collect()
});

static ITEM_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p, li").expect("valid selector"));

/// Scan the best-guess main-content container for paragraphs and list items.
///
/// Returns one synthetic "Main Content" section, or `None` when there is no
/// container or nothing in it qualifies.
pub fn extract_main_content(doc: &Html) -> Option<Section> {
    let Some(container) = dom::first_match(doc, &CONTAINERS) else {
        debug!("no main-content container found");
        return None;
    };

    let mut local: HashSet<String> = HashSet::new();
    let mut items = Vec::new();

    for el in container.select(&ITEM_SEL) {
        let text = normalize(&dom::element_text(&el));
        if text_len(&text) > FALLBACK_MIN_LEN && !local.contains(&text) && !is_noise(&text) {
            local.insert(text.clone());
            items.push(text);
        }
    }

    debug!(
        container = container.value().name(),
        items = items.len(),
        "fallback extraction complete"
    );

    if items.is_empty() {
        None
    } else {
        Some(Section::new(1, MAIN_CONTENT_TITLE, 1, items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_paragraphs_and_list_items_from_main() {
        let doc = Html::parse_document(
            r#"<body>
                <div class="sidebar"><p>Sidebar text that should be ignored.</p></div>
                <main>
                    <p>The first paragraph of the main content.</p>
                    <ul><li>A list item long enough to be kept.</li><li>Too short.</li></ul>
                    <p>The first paragraph of the main content.</p>
                </main>
            </body>"#,
        );

        let section = extract_main_content(&doc).unwrap();
        assert_eq!(section.title, "Main Content");
        assert_eq!(section.level, 1);
        assert_eq!(
            section.content_items,
            vec![
                "The first paragraph of the main content.",
                "A list item long enough to be kept."
            ]
        );
    }

    #[test]
    fn prefers_main_over_content_class() {
        let doc = Html::parse_document(
            r#"<body>
                <div class="content"><p>Text inside the generic content block.</p></div>
                <main><p>Text inside the semantic main element.</p></main>
            </body>"#,
        );
        let section = extract_main_content(&doc).unwrap();
        assert_eq!(
            section.content_items,
            vec!["Text inside the semantic main element."]
        );
    }

    #[test]
    fn content_class_conventions_are_recognized() {
        let doc = Html::parse_document(
            r#"<body><div class="entry-content"><p>Blog body paragraph with enough text.</p></div></body>"#,
        );
        assert!(extract_main_content(&doc).is_some());
    }

    #[test]
    fn no_container_means_none() {
        let doc = Html::parse_document("<body><p>Loose paragraph with plenty of words.</p></body>");
        assert!(extract_main_content(&doc).is_none());
    }

    #[test]
    fn empty_container_means_none() {
        let doc = Html::parse_document("<body><article><p>Short.</p></article></body>");
        assert!(extract_main_content(&doc).is_none());
    }
}
