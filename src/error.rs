//! Error types for the keyvox library.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the keyvox library.
#[derive(Error, Debug)]
pub enum Error {
    /// No keyboard layout is registered for the requested language.
    #[error("no keyboard layout registered for language '{0}'")]
    LayoutNotFound(String),

    /// A layout table failed to parse or violated a structural invariant.
    #[error("invalid layout table for '{lang}': {reason}")]
    InvalidLayout {
        /// Language code of the offending table.
        lang: String,
        /// What was wrong with it.
        reason: String,
    },

    /// An audio asset could not be loaded, decoded, or played.
    #[error("audio playback failed for {path}: {reason}")]
    Playback {
        /// Path of the asset that failed.
        path: PathBuf,
        /// Backend-reported cause.
        reason: String,
    },

    /// The host has no usable audio output device.
    #[error("no audio output device available")]
    NoOutputDevice,

    /// The asset exists but is in a format the backend cannot play.
    #[error("unsupported audio format in {path}: {reason}")]
    UnsupportedAudio {
        /// Path of the offending asset.
        path: PathBuf,
        /// Which part of the format is unsupported.
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;
