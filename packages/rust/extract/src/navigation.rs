//! Level-0 sections collected from navigation and footer link lists.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::debug;

use webchunker_shared::{FOOTER_TITLE, NAVIGATION_TITLE, Section};

use crate::dom;
use crate::normalize::normalize;
use crate::segment::SeenSet;

static NAV_LISTS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("nav ul").expect("valid selector"));
static FOOTER_LISTS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("footer ul").expect("valid selector"));
static LIST_ITEM_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("valid selector"));

/// Separators that split one list item into several labels.
const LABEL_SEPARATORS: &[char] = &['\n', '–', '—'];

/// "Navigation" then "Footer Links" sections, each only when non-empty.
///
/// Every emitted label is recorded in `seen`.
pub fn navigation_sections(doc: &Html, seen: &mut SeenSet) -> Vec<Section> {
    let mut sections = Vec::new();

    for (selector, title) in [(&*NAV_LISTS, NAVIGATION_TITLE), (&*FOOTER_LISTS, FOOTER_TITLE)] {
        let labels = collect_labels(doc, selector);
        debug!(title, labels = labels.len(), "collected chrome links");
        if labels.is_empty() {
            continue;
        }
        for label in &labels {
            seen.insert(label.clone());
        }
        sections.push(Section::new(sections.len() + 1, title, 0, labels));
    }

    sections
}

fn collect_labels(doc: &Html, lists: &Selector) -> Vec<String> {
    let mut local: HashSet<String> = HashSet::new();
    let mut labels = Vec::new();

    for list in doc.select(lists) {
        for li in list.select(&LIST_ITEM_SEL) {
            let raw = dom::element_text(&li);
            for piece in raw.split(LABEL_SEPARATORS) {
                let label = normalize(piece);
                if !label.is_empty() && local.insert(label.clone()) {
                    labels.push(label);
                }
            }
        }
    }

    labels
}
