//! Core data models: key entries, layouts, and the derivations over them.

pub mod key;
pub mod layout;

pub use key::{KeyEntry, KeyLabels};
pub use layout::{CharMatch, Layout};
