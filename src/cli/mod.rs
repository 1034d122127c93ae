//! CLI command handlers for Keyvox.
//!
//! This module provides headless, scriptable access to the keyboard core
//! for trying out layouts and audio without an embedding UI.

pub mod langs;
pub mod play;
pub mod show;
pub mod spell;

// Re-export types used by main.rs and tests
pub use langs::LangsArgs;
pub use play::PlayArgs;
pub use show::ShowArgs;
pub use spell::SpellArgs;
