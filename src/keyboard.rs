//! Keyboard session state machine.
//!
//! [`Keyboard`] owns everything a rendered keyboard needs: the current
//! language and its layout, the sticky shift flag, and the active-key
//! highlight with its auto-clear timer. The timer is a single slot:
//! activating a new key aborts the pending clear of the previous one, so
//! exactly one clear ever fires no matter how fast keys are pressed.
//!
//! Shift state deliberately has two writers: clicking the rendered Shift key
//! toggles sticky shift as part of the press, while physically releasing the
//! real Shift modifier clears the flag directly. The two entry points are
//! kept separate on purpose.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info};

use crate::audio::{AudioBackend, AudioPlayer};
use crate::config::Config;
use crate::error::Result;
use crate::models::{KeyEntry, Layout};
use crate::registry::LayoutRegistry;
use crate::speller::{self, SpellStep};

/// Per-key view model handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyView {
    /// Physical key identifier.
    pub code: String,
    /// Label for the main slot of the keycap.
    pub main_label: String,
    /// Label for the shifted slot; empty when nothing renders there.
    pub shifted_label: String,
    /// Glyph the highlight bubble shows under the current shift state.
    pub display_value: String,
    /// Whether this key is the currently highlighted one.
    pub is_active: bool,
    /// Whether this key is an on-screen Shift key.
    pub is_shift_key: bool,
}

/// Mutable session state behind the keyboard's lock.
#[derive(Debug)]
struct SessionState {
    lang: String,
    layout: Arc<Layout>,
    shift_active: bool,
    active_key: Option<KeyEntry>,
    clear_generation: u64,
    pending_clear: Option<AbortHandle>,
}

/// The keyboard session: current language, shift state, active-key
/// highlight, and the audio pipeline that pronounces keys.
pub struct Keyboard<B> {
    registry: Arc<LayoutRegistry>,
    player: AudioPlayer<B>,
    state: Arc<Mutex<SessionState>>,
    highlight: Duration,
}

impl<B: AudioBackend> Keyboard<B> {
    /// Creates a session with the configured default language preloaded.
    pub async fn new(config: &Config, backend: B) -> Result<Self> {
        let registry = Arc::new(LayoutRegistry::new());
        let lang = config.behavior.default_lang.clone();
        let layout = registry.get(&lang).await?;
        let player = AudioPlayer::new(backend, Arc::clone(&registry), &config.assets);

        info!("keyboard session started ({})", lang);
        Ok(Self {
            registry,
            player,
            state: Arc::new(Mutex::new(SessionState {
                lang,
                layout,
                shift_active: false,
                active_key: None,
                clear_generation: 0,
                pending_clear: None,
            })),
            highlight: config.highlight_duration(),
        })
    }

    /// Language codes the session can switch between.
    pub fn languages(&self) -> &'static [&'static str] {
        LayoutRegistry::languages()
    }

    /// Currently selected language code.
    pub fn current_language(&self) -> String {
        self.state.lock().unwrap().lang.clone()
    }

    /// Current sticky-shift state.
    pub fn shift_active(&self) -> bool {
        self.state.lock().unwrap().shift_active
    }

    /// The currently highlighted key, if any.
    pub fn active_key(&self) -> Option<KeyEntry> {
        self.state.lock().unwrap().active_key.clone()
    }

    /// The current language's layout.
    pub fn layout(&self) -> Arc<Layout> {
        Arc::clone(&self.state.lock().unwrap().layout)
    }

    /// Flips sticky shift (the on-screen Shift key behavior).
    pub fn toggle_shift(&self) {
        let mut state = self.state.lock().unwrap();
        state.shift_active = !state.shift_active;
    }

    /// Sets shift directly (the physical-modifier listener behavior).
    pub fn set_shift(&self, on: bool) {
        self.state.lock().unwrap().shift_active = on;
    }

    /// Switches the session language, loading the layout if needed.
    ///
    /// Shift state and the active key survive the switch; a failed load
    /// leaves the session untouched.
    pub async fn switch_language(&self, lang: &str) -> Result<()> {
        let layout = self.registry.get(lang).await?;
        let mut state = self.state.lock().unwrap();
        state.lang = lang.to_string();
        state.layout = layout;
        info!("switched keyboard language to '{}'", lang);
        Ok(())
    }

    /// Highlights `entry` and schedules the auto-clear.
    ///
    /// Any pending clear of a previous key is cancelled; the returned handle
    /// completes when this key's clear fires (or resolves cancelled if yet
    /// another key supersedes it).
    pub fn set_active_key(&self, entry: &KeyEntry) -> JoinHandle<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(pending) = state.pending_clear.take() {
            pending.abort();
        }
        state.clear_generation += 1;
        let generation = state.clear_generation;
        state.active_key = Some(entry.clone());

        let shared = Arc::clone(&self.state);
        let delay = self.highlight;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = shared.lock().unwrap();
            if state.clear_generation == generation {
                state.active_key = None;
                state.pending_clear = None;
            }
        });
        state.pending_clear = Some(handle.abort_handle());
        handle
    }

    /// Handles a key press (on-screen click or physical key-down).
    ///
    /// Resolves the code against the current layout, highlights the key, and
    /// pronounces it, completing when playback has finished. Pressing a
    /// Shift key toggles sticky shift as part of the same gesture. An
    /// unmapped code is a no-op.
    pub async fn press_key(&self, code: &str) -> Option<KeyEntry> {
        let (entry, lang) = {
            let state = self.state.lock().unwrap();
            match state.layout.find_by_code(code) {
                Some(entry) => (entry.clone(), state.lang.clone()),
                None => {
                    debug!("ignoring unmapped physical key '{}'", code);
                    return None;
                }
            }
        };

        self.set_active_key(&entry);
        if entry.is_shift() {
            self.toggle_shift();
        }
        let shift_active = self.shift_active();

        self.player.play_key(&lang, &entry, shift_active).await;
        Some(entry)
    }

    /// Handles a physical key release: releasing the real Shift modifier
    /// clears sticky shift directly. Other keys are ignored on release.
    pub fn release_key(&self, code: &str) {
        if code.contains("Shift") {
            self.set_shift(false);
        }
    }

    /// Spells `text` by pressing its characters one at a time.
    ///
    /// Strictly serial: each character's audio and its full highlight window
    /// (including the auto-clear) finish before the next character starts.
    /// Shift is toggled around characters that need the other shift state
    /// and restored afterwards. Characters with no key in the current layout
    /// are skipped.
    pub async fn spell(&self, text: &str) -> Result<()> {
        let lang = self.current_language();
        // Keeps the contract honest even if a caller raced a language switch.
        let layout = self.registry.get(&lang).await?;

        let queue: Vec<SpellStep> = speller::spell_queue(&layout, text);
        info!("spelling '{}' ({} steps)", text, queue.len());

        for step in queue {
            let toggled = self.shift_active() != step.shift_required;
            if toggled {
                self.toggle_shift();
            }

            let clear = self.set_active_key(&step.entry);
            let _ = tokio::join!(
                self.player.play_key(&lang, &step.entry, step.shift_required),
                clear
            );

            if toggled {
                self.toggle_shift();
            }
        }
        Ok(())
    }

    /// Builds the per-key view models for the rendering layer.
    pub fn view(&self) -> Vec<Vec<KeyView>> {
        let state = self.state.lock().unwrap();
        state
            .layout
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|key| {
                        let labels = key.labels();
                        KeyView {
                            code: key.code.clone(),
                            main_label: labels.main,
                            shifted_label: labels.shifted,
                            display_value: key.display_value(state.shift_active),
                            is_active: state
                                .active_key
                                .as_ref()
                                .is_some_and(|active| active.code == key.code),
                            is_shift_key: key.is_shift(),
                        }
                    })
                    .collect()
            })
            .collect()
    }
}
