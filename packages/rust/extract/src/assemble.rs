//! Final clean-up pass over segmented sections.

use std::collections::HashSet;

use tracing::debug;

use webchunker_shared::Section;

use crate::noise::is_noise;
use crate::normalize::text_len;

/// Assembled items must be longer than this.
const MIN_ITEM_LEN: usize = 5;

/// Filter, deduplicate and re-index sections into their public shape.
///
/// 1. drop sections with no content
/// 2. drop items that are too short, noise, or already emitted earlier in the result
/// 3. drop sections emptied by step 2
/// 4. renumber `index` as a contiguous 1-based run
///
/// Idempotent: assembling an assembled list returns it unchanged.
pub fn assemble(sections: Vec<Section>) -> Vec<Section> {
    let before = sections.len();
    let mut emitted: HashSet<String> = HashSet::new();

    let mut assembled: Vec<Section> = sections
        .into_iter()
        .filter(|s| !s.content_items.is_empty())
        .filter_map(|mut section| {
            section.content_items.retain(|item| {
                text_len(item) > MIN_ITEM_LEN && !is_noise(item) && emitted.insert(item.clone())
            });
            (!section.content_items.is_empty()).then_some(section)
        })
        .collect();

    for (position, section) in assembled.iter_mut().enumerate() {
        section.index = position + 1;
    }

    debug!(before, after = assembled.len(), "sections assembled");

    assembled
}
