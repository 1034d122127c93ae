//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the keyboard session defaults.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Keyvox";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "keyvox";

/// Directory name used under the platform config dir (e.g. `~/.config/Keyvox/`).
pub const CONFIG_DIR_NAME: &str = "Keyvox";

/// Language selected when a session starts and no configuration overrides it.
pub const DEFAULT_LANG: &str = "en";

/// Language whose audio assets back up every other language.
pub const FALLBACK_LANG: &str = "en";

/// How long a pressed key stays highlighted before it auto-clears, in milliseconds.
pub const DEFAULT_HIGHLIGHT_MS: u64 = 1000;

/// Default directory the per-language audio assets live under.
pub const DEFAULT_ASSET_ROOT: &str = "assets/sounds";

/// Default audio asset file extension.
pub const DEFAULT_AUDIO_EXT: &str = "wav";
