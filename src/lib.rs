//! Keyvox Library
//!
//! This library provides the core of a multilingual talking keyboard:
//! per-language layout tables, key resolution, per-key audio pronunciation
//! with an English fallback, keyboard session state (sticky shift, active-key
//! highlighting), and word-spelling playback. Rendering is left to the
//! embedding application, which consumes the per-key view models.

// Module declarations
pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod keyboard;
pub mod models;
pub mod registry;
pub mod speller;

pub use error::{Error, Result};
pub use keyboard::{KeyView, Keyboard};
