//! Language layout tables and key resolution.
//!
//! A [`Layout`] is the full static keyboard definition for one language:
//! ordered rows of [`KeyEntry`], in exactly the visual arrangement. Both
//! resolution entry points are pure row-major scans, so the first matching
//! entry (top row first, left to right) always wins.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::models::KeyEntry;

/// Full static keyboard definition for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Language code this table belongs to (e.g. "en", "ru", "ar").
    pub lang: String,
    /// Human-readable language name (e.g. "English", "Русский").
    pub name: String,
    /// Ordered rows of keys; row order and within-row order are the visual
    /// arrangement and are preserved exactly.
    pub rows: Vec<Vec<KeyEntry>>,
}

/// Result of resolving a literal character against a layout.
///
/// `shift_required` tells the caller whether the character lives in the
/// shifted slot, so shift state can be reconstructed for display and
/// spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharMatch<'a> {
    /// The matching layout entry.
    pub entry: &'a KeyEntry,
    /// True when the character is the entry's shifted glyph.
    pub shift_required: bool,
}

impl Layout {
    /// Parses and validates a layout table from its JSON source.
    pub fn parse(lang: &str, json: &str) -> Result<Self> {
        let layout: Self = serde_json::from_str(json).map_err(|e| Error::InvalidLayout {
            lang: lang.to_string(),
            reason: e.to_string(),
        })?;
        layout.validate()?;
        Ok(layout)
    }

    /// Checks the structural invariants: at least one row, no empty key
    /// codes, and `code` unique across the flattened entry set.
    pub fn validate(&self) -> Result<()> {
        if self.rows.is_empty() {
            return Err(self.invalid("layout has no rows"));
        }

        let mut seen = HashSet::new();
        for key in self.keys() {
            if key.code.is_empty() {
                return Err(self.invalid("entry with empty code"));
            }
            if !seen.insert(key.code.as_str()) {
                return Err(self.invalid(&format!("duplicate key code '{}'", key.code)));
            }
        }
        Ok(())
    }

    /// Iterates all entries in row-major order.
    pub fn keys(&self) -> impl Iterator<Item = &KeyEntry> {
        self.rows.iter().flatten()
    }

    /// Returns the first entry whose `code` matches exactly, or `None` for an
    /// unmapped physical key.
    pub fn find_by_code(&self, code: &str) -> Option<&KeyEntry> {
        self.keys().find(|key| key.code == code)
    }

    /// Returns the first entry whose `main` or `shifted` glyph equals the
    /// given character, together with the shift state required to produce it.
    pub fn find_by_char(&self, ch: char) -> Option<CharMatch<'_>> {
        let mut buf = [0u8; 4];
        let needle: &str = ch.encode_utf8(&mut buf);

        self.keys().find_map(|key| {
            if key.main.as_deref() == Some(needle) {
                Some(CharMatch {
                    entry: key,
                    shift_required: false,
                })
            } else if key.shifted.as_deref() == Some(needle) {
                Some(CharMatch {
                    entry: key,
                    shift_required: true,
                })
            } else {
                None
            }
        })
    }

    /// Total number of keys across all rows.
    pub fn key_count(&self) -> usize {
        self.keys().count()
    }

    fn invalid(&self, reason: &str) -> Error {
        Error::InvalidLayout {
            lang: self.lang.clone(),
            reason: reason.to_string(),
        }
    }
}
