//! Spell sequencing.
//!
//! Turns an input string into the ordered queue of key activations the
//! keyboard plays back one at a time. Resolution happens once, up front, at
//! spell-invocation time; the queue is consumed in order and never kept.

use tracing::debug;

use crate::models::{KeyEntry, Layout};

/// One step of a spell sequence: which key to press and whether shift must
/// be held to produce the character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellStep {
    /// The key that produces the character.
    pub entry: KeyEntry,
    /// True when the character lives in the key's shifted slot.
    pub shift_required: bool,
}

/// Builds the spell queue for `text` against a layout.
///
/// Characters with no matching key are skipped; the rest keep their order.
pub fn spell_queue(layout: &Layout, text: &str) -> Vec<SpellStep> {
    text.chars()
        .filter_map(|ch| match layout.find_by_char(ch) {
            Some(hit) => Some(SpellStep {
                entry: hit.entry.clone(),
                shift_required: hit.shift_required,
            }),
            None => {
                debug!("no key for '{}' in the '{}' layout, skipping", ch, layout.lang);
                None
            }
        })
        .collect()
}
