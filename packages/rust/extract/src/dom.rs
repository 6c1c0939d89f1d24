//! Small DOM helpers over `scraper` used by the extraction stages.
//!
//! Traversal is always materialized into explicit lists (sibling runs, heading
//! lists) so callers walk them with a plain index instead of a live cursor.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text never counts as content.
const SKIPPED_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// ARIA roles treated like `<nav>` / `<footer>`.
const CHROME_ROLES: &[&str] = &["navigation", "contentinfo"];

/// Selector for every heading element, in document order.
pub(crate) static HEADING_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").expect("valid selector"));

/// Heading rank of an `h1`–`h6` element.
pub fn heading_level(el: &ElementRef<'_>) -> Option<u8> {
    let name = el.value().name();
    let mut chars = name.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('h'), Some(d @ '1'..='6'), None) => d.to_digit(10).map(|n| n as u8),
        _ => None,
    }
}

/// Whether `el` is a navigation/footer element itself.
pub fn is_chrome(el: &ElementRef<'_>) -> bool {
    let value = el.value();
    matches!(value.name(), "nav" | "footer")
        || value
            .attr("role")
            .is_some_and(|role| CHROME_ROLES.contains(&role.trim()))
}

/// Whether `el` sits inside a `<nav>` / `<footer>` (or an ARIA equivalent).
pub fn in_nav_or_footer(el: &ElementRef<'_>) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| is_chrome(&ancestor))
}

/// Raw text of an element, skipping script/style-like subtrees.
///
/// Text nodes are concatenated as-is; callers normalize.
pub fn element_text(el: &ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(*el, &mut out);
    out
}

fn collect_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(e) if SKIPPED_TEXT_TAGS.contains(&e.name()) => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

/// Element siblings following `el`, in document order.
pub fn following_siblings<'a>(el: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    el.next_siblings().filter_map(ElementRef::wrap).collect()
}

/// Whether a heading nested inside `el` (excluding `el` itself) satisfies
/// `pred`. Headings that live in navigation/footer chrome are ignored.
pub fn contains_heading(el: &ElementRef<'_>, pred: impl Fn(u8) -> bool) -> bool {
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter_map(|d| heading_level(&d).map(|level| (d, level)))
        .any(|(d, level)| pred(level) && !in_nav_or_footer(&d))
}

/// Every heading element in document order.
pub fn all_headings(doc: &Html) -> Vec<ElementRef<'_>> {
    doc.select(&HEADING_SEL).collect()
}

/// First element matching any selector in `candidates`, tried in priority order.
pub fn first_match<'a>(doc: &'a Html, candidates: &[Selector]) -> Option<ElementRef<'a>> {
    candidates
        .iter()
        .find_map(|selector| doc.select(selector).next())
}
