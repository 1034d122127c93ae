//! Per-language layout registry.
//!
//! Layout tables are embedded in the binary as JSON and parsed lazily on
//! first use. Parsed layouts are cached for the lifetime of the process and
//! handed out as shared references; the small, fixed language set means no
//! eviction is ever needed.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Layout;

/// Languages shipped with the application, in switcher display order.
pub const LANGUAGES: &[&str] = &["en", "ru", "ar"];

/// Returns the embedded JSON table for a language, if one ships with the app.
fn embedded_table(lang: &str) -> Option<&'static str> {
    match lang {
        "en" => Some(include_str!("data/en.json")),
        "ru" => Some(include_str!("data/ru.json")),
        "ar" => Some(include_str!("data/ar.json")),
        _ => None,
    }
}

/// Lazily-loading, memoizing registry of per-language keyboard layouts.
///
/// The first [`get`](Self::get) for a language parses its embedded table and
/// caches the result; later calls return the same shared layout without
/// reparsing. The cache lock is held across the parse, so concurrent first
/// calls for one language can never produce diverging cached copies.
#[derive(Debug, Default)]
pub struct LayoutRegistry {
    cache: Mutex<HashMap<String, Arc<Layout>>>,
}

impl LayoutRegistry {
    /// Creates an empty registry; nothing is parsed until first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// The set of supported language codes.
    pub fn languages() -> &'static [&'static str] {
        LANGUAGES
    }

    /// Returns the layout for `lang`, loading and caching it on first use.
    ///
    /// Fails with [`Error::LayoutNotFound`] when no table ships for `lang`;
    /// other languages' cache entries are unaffected by the failure.
    pub async fn get(&self, lang: &str) -> Result<Arc<Layout>> {
        let mut cache = self.cache.lock().await;
        if let Some(layout) = cache.get(lang) {
            return Ok(Arc::clone(layout));
        }

        let json = embedded_table(lang).ok_or_else(|| Error::LayoutNotFound(lang.to_string()))?;
        let layout = Arc::new(Layout::parse(lang, json)?);
        debug!("loaded '{}' keyboard layout ({} keys)", lang, layout.key_count());
        cache.insert(lang.to_string(), Arc::clone(&layout));
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_all_embedded_tables_parse_and_validate() {
        let registry = LayoutRegistry::new();
        for lang in LayoutRegistry::languages() {
            let layout = registry.get(lang).await.unwrap();
            assert_eq!(&layout.lang, lang);
            assert!(layout.key_count() > 40, "'{}' table looks truncated", lang);
        }
    }

    #[tokio::test]
    async fn test_get_is_idempotent_and_returns_same_instance() {
        let registry = LayoutRegistry::new();
        let first = registry.get("ru").await.unwrap();
        let second = registry.get("ru").await.unwrap();
        assert!(Arc::ptr_eq(&first, &second), "second call must hit the cache");
    }

    #[tokio::test]
    async fn test_concurrent_first_loads_converge() {
        let registry = LayoutRegistry::new();
        let (a, b) = tokio::join!(registry.get("ar"), registry.get("ar"));
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
    }

    #[tokio::test]
    async fn test_unknown_language_is_not_found() {
        let registry = LayoutRegistry::new();
        let err = registry.get("xx").await.unwrap_err();
        assert!(matches!(err, Error::LayoutNotFound(ref lang) if lang == "xx"));

        // and does not poison other entries
        assert!(registry.get("en").await.is_ok());
    }

    #[tokio::test]
    async fn test_english_table_has_expected_entries() {
        let registry = LayoutRegistry::new();
        let en = registry.get("en").await.unwrap();

        let q = en.find_by_code("KeyQ").unwrap();
        assert_eq!(q.main.as_deref(), Some("q"));
        assert_eq!(q.shifted.as_deref(), Some("Q"));

        let digit1 = en.find_by_code("Digit1").unwrap();
        assert_eq!(digit1.shifted_name.as_deref(), Some("exclamation mark"));
    }

    #[tokio::test]
    async fn test_arabic_table_has_diacritic_names() {
        let registry = LayoutRegistry::new();
        let ar = registry.get("ar").await.unwrap();

        let sheen = ar.find_by_code("KeyA").unwrap();
        assert_eq!(sheen.main.as_deref(), Some("ش"));
        assert_eq!(sheen.shifted_name.as_deref(), Some("kasra"));
    }
}
