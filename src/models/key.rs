//! A single key's layout definition and the label/audio derivations over it.

use serde::{Deserialize, Serialize};

/// One physical key's layout definition within a language table.
///
/// `code` is the stable physical identifier (e.g. `KeyQ`, `Digit1`,
/// `ShiftLeft`) and is unique within a layout. Everything else is optional:
/// function and modifier keys carry no glyphs at all and resolve to their
/// `label` or `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntry {
    /// Physical key identifier, stable across languages (e.g. "KeyQ").
    pub code: String,
    /// Unshifted glyph (e.g. "q", "й", "ض").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    /// Shifted glyph (e.g. "Q", "!", "ِ").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shifted: Option<String>,
    /// Explicit display override (e.g. "Esc", "Shift"); wins over any glyph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Spoken-name override for the unshifted variant (e.g. "минус" for "-").
    #[serde(default, rename = "mainName", skip_serializing_if = "Option::is_none")]
    pub main_name: Option<String>,
    /// Spoken-name override for the shifted variant (e.g. "exclamation mark" for "!").
    #[serde(default, rename = "shiftedName", skip_serializing_if = "Option::is_none")]
    pub shifted_name: Option<String>,
}

/// Display labels derived from a [`KeyEntry`], ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyLabels {
    /// Label for the main (lower) slot of the keycap.
    pub main: String,
    /// Label for the shifted (upper) slot; empty when nothing should render there.
    pub shifted: String,
}

impl KeyEntry {
    /// Derives the rendered keycap labels.
    ///
    /// For languages where shift merely capitalizes (`main.to_uppercase() ==
    /// shifted`, e.g. q/Q or ф/Ф), the main slot shows the uppercase form and
    /// the shifted slot stays empty. Otherwise the main slot is `label`, else
    /// `main`, else `code`, and the shifted slot is `shifted` as-is.
    pub fn labels(&self) -> KeyLabels {
        let main = self.main.as_deref().unwrap_or("");
        let shifted = self.shifted.as_deref().unwrap_or("");
        let uppercase_lang = !main.is_empty() && main.to_uppercase() == shifted;

        let main_glyph = if uppercase_lang { shifted } else { main };
        let shifted_out = if uppercase_lang { "" } else { shifted };

        let main_out = self
            .label
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(if main_glyph.is_empty() { None } else { Some(main_glyph) })
            .unwrap_or(&self.code);

        KeyLabels {
            main: main_out.to_string(),
            shifted: shifted_out.to_string(),
        }
    }

    /// Derives the audio-file basename for this key under the given shift state.
    ///
    /// Priority: the spoken-name override, then the glyph itself, then the
    /// physical `code`. The result is lowercased so asset paths stay stable
    /// regardless of glyph casing, and is never empty (`code` never is).
    pub fn audio_basename(&self, shift_active: bool) -> String {
        let name = if shift_active {
            self.shifted_name
                .as_deref()
                .or(self.shifted.as_deref())
                .unwrap_or(&self.code)
        } else {
            self.main_name
                .as_deref()
                .or(self.main.as_deref())
                .unwrap_or(&self.code)
        };
        name.to_lowercase()
    }

    /// The glyph the active-key highlight shows for the given shift state,
    /// falling back to the physical `code` for glyphless keys.
    pub fn display_value(&self, shift_active: bool) -> String {
        let glyph = if shift_active {
            self.shifted.as_deref()
        } else {
            self.main.as_deref()
        };
        glyph.unwrap_or(&self.code).to_string()
    }

    /// Whether this entry is one of the on-screen Shift keys.
    pub fn is_shift(&self) -> bool {
        self.code.contains("Shift")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str) -> KeyEntry {
        KeyEntry {
            code: code.to_string(),
            main: None,
            shifted: None,
            label: None,
            main_name: None,
            shifted_name: None,
        }
    }

    fn glyph_entry(code: &str, main: &str, shifted: &str) -> KeyEntry {
        KeyEntry {
            main: Some(main.to_string()),
            shifted: Some(shifted.to_string()),
            ..entry(code)
        }
    }

    #[test]
    fn test_labels_uppercase_language_inverts_slots() {
        let labels = glyph_entry("KeyQ", "q", "Q").labels();
        assert_eq!(labels.main, "Q", "main slot should show the uppercase form");
        assert_eq!(labels.shifted, "", "shifted slot should be empty");

        let labels = glyph_entry("KeyA", "ф", "Ф").labels();
        assert_eq!(labels.main, "Ф");
        assert_eq!(labels.shifted, "");
    }

    #[test]
    fn test_labels_distinct_glyph_shifting_keeps_both_slots() {
        let labels = glyph_entry("Digit1", "1", "!").labels();
        assert_eq!(labels.main, "1");
        assert_eq!(labels.shifted, "!");

        // Arabic: shift produces a diacritic, not a capital
        let labels = glyph_entry("KeyQ", "ض", "َ").labels();
        assert_eq!(labels.main, "ض");
        assert_eq!(labels.shifted, "َ");
    }

    #[test]
    fn test_labels_shifted_empty_iff_case_inversion() {
        let inverting = glyph_entry("KeyZ", "z", "Z");
        let distinct = glyph_entry("Digit2", "2", "@");
        assert!(inverting.labels().shifted.is_empty());
        assert!(!distinct.labels().shifted.is_empty());
    }

    #[test]
    fn test_labels_explicit_label_wins() {
        let esc = KeyEntry {
            label: Some("Esc".to_string()),
            ..entry("Escape")
        };
        assert_eq!(esc.labels().main, "Esc");

        // label beats a derived glyph too
        let space = KeyEntry {
            label: Some("space".to_string()),
            main: Some(" ".to_string()),
            main_name: Some("space".to_string()),
            ..entry("Space")
        };
        assert_eq!(space.labels().main, "space");
    }

    #[test]
    fn test_labels_fall_back_to_code() {
        let f1 = entry("F1");
        assert_eq!(f1.labels().main, "F1");
        assert_eq!(f1.labels().shifted, "");
    }

    #[test]
    fn test_audio_basename_unshifted_glyph() {
        let q = glyph_entry("KeyQ", "q", "Q");
        assert_eq!(q.audio_basename(false), "q");
    }

    #[test]
    fn test_audio_basename_shifted_name_override() {
        // Shifted Digit1 speaks "exclamation mark", not "!"
        let digit1 = KeyEntry {
            shifted_name: Some("exclamation mark".to_string()),
            ..glyph_entry("Digit1", "1", "!")
        };
        assert_eq!(digit1.audio_basename(true), "exclamation mark");
        assert_eq!(digit1.audio_basename(false), "1");
    }

    #[test]
    fn test_audio_basename_arabic_diacritic_name() {
        // Arabic KeyA + shift speaks the diacritic's name
        let sheen = KeyEntry {
            shifted_name: Some("kasra".to_string()),
            ..glyph_entry("KeyA", "ش", "ِ")
        };
        assert_eq!(sheen.audio_basename(true), "kasra");
    }

    #[test]
    fn test_audio_basename_lowercased_and_never_empty() {
        let q = glyph_entry("KeyQ", "q", "Q");
        assert_eq!(q.audio_basename(true), "q", "shifted glyph is lowercased");

        let tab = entry("Tab");
        assert_eq!(tab.audio_basename(false), "tab", "glyphless key falls back to code");
        assert!(!tab.audio_basename(true).is_empty());
    }

    #[test]
    fn test_display_value_tracks_shift_state() {
        let q = glyph_entry("KeyQ", "q", "Q");
        assert_eq!(q.display_value(false), "q");
        assert_eq!(q.display_value(true), "Q");

        let enter = entry("Enter");
        assert_eq!(enter.display_value(false), "Enter");
        assert_eq!(enter.display_value(true), "Enter");
    }

    #[test]
    fn test_is_shift() {
        assert!(entry("ShiftLeft").is_shift());
        assert!(entry("ShiftRight").is_shift());
        assert!(!entry("KeyS").is_shift());
        assert!(!entry("ControlLeft").is_shift());
    }

    #[test]
    fn test_deserializes_camel_case_name_fields() {
        let json = r#"{
            "code": "Minus",
            "main": "-",
            "shifted": "_",
            "mainName": "minus",
            "shiftedName": "underscore"
        }"#;
        let key: KeyEntry = serde_json::from_str(json).unwrap();
        assert_eq!(key.main_name.as_deref(), Some("minus"));
        assert_eq!(key.shifted_name.as_deref(), Some("underscore"));
    }
}
