//! Audio playback pipeline for key pronunciation.
//!
//! This module turns a resolved key entry into an asset path
//! (`{root}/{lang}/{basename}.{ext}`), plays it through a pluggable output
//! backend, and applies the language-fallback policy: when a non-English
//! asset fails to play, the same physical key is re-resolved against the
//! English layout and retried once under `en/`. Playback failures never
//! propagate past [`AudioPlayer::play_key`]; the visual highlight must work
//! even when no sound can.
//!
//! The device-level backend is a trait so tests (and the `--no-audio` mode)
//! can inject their own; the real one decodes PCM WAV and plays it through
//! cpal.

#[cfg(feature = "playback")]
pub mod decoder;
#[cfg(feature = "playback")]
pub mod output;

#[cfg(feature = "playback")]
pub use output::CpalBackend;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::AssetConfig;
use crate::constants::FALLBACK_LANG;
use crate::error::{Error, Result};
use crate::models::KeyEntry;
use crate::registry::LayoutRegistry;

/// Device-level audio output.
///
/// `play` blocks until playback finishes; the player drives it through the
/// blocking pool so the async contract holds. Each call stands alone:
/// overlapping plays must not cancel each other.
pub trait AudioBackend: Send + Sync + 'static {
    /// Plays the asset at `path`, returning once playback has completed.
    fn play(&self, path: &Path) -> Result<()>;
}

/// Backend that verifies assets exist but produces no sound.
///
/// Used by `--no-audio` and when the `playback` feature is disabled; keeping
/// the existence check means the fallback policy stays observable.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn play(&self, path: &Path) -> Result<()> {
        if path.is_file() {
            Ok(())
        } else {
            Err(Error::Playback {
                path: path.to_path_buf(),
                reason: "asset not found".to_string(),
            })
        }
    }
}

/// Backend picked at startup: the real device when available, silence
/// otherwise.
#[derive(Debug, Clone, Copy)]
pub enum DefaultBackend {
    /// Existence-checking, soundless output.
    Silent(SilentBackend),
    /// Device output through cpal.
    #[cfg(feature = "playback")]
    Cpal(CpalBackend),
}

impl DefaultBackend {
    /// Picks the device backend unless audio is disabled or compiled out.
    pub fn select(no_audio: bool) -> Self {
        #[cfg(feature = "playback")]
        if !no_audio {
            return Self::Cpal(CpalBackend::new());
        }
        #[cfg(not(feature = "playback"))]
        let _ = no_audio;
        Self::Silent(SilentBackend)
    }
}

impl AudioBackend for DefaultBackend {
    fn play(&self, path: &Path) -> Result<()> {
        match self {
            Self::Silent(backend) => backend.play(path),
            #[cfg(feature = "playback")]
            Self::Cpal(backend) => backend.play(path),
        }
    }
}

/// Plays per-key pronunciation audio with the English fallback policy.
pub struct AudioPlayer<B> {
    backend: Arc<B>,
    registry: Arc<LayoutRegistry>,
    asset_root: PathBuf,
    extension: String,
}

impl<B: AudioBackend> AudioPlayer<B> {
    /// Creates a player over the given backend and asset locations.
    pub fn new(backend: B, registry: Arc<LayoutRegistry>, assets: &AssetConfig) -> Self {
        Self {
            backend: Arc::new(backend),
            registry,
            asset_root: assets.root.clone(),
            extension: assets.extension.clone(),
        }
    }

    /// Computes the asset path for a language and audio basename.
    pub fn asset_path(&self, lang: &str, basename: &str) -> PathBuf {
        self.asset_root
            .join(lang)
            .join(format!("{}.{}", basename, self.extension))
    }

    /// Pronounces one key, completing when playback has finished.
    ///
    /// Failure policy: a failed non-English play is retried once with the
    /// English asset for the same physical key; a failed fallback (or a
    /// failed English primary) is logged and swallowed, so the caller's flow
    /// is never interrupted by missing or undecodable audio.
    pub async fn play_key(&self, lang: &str, entry: &KeyEntry, shift_active: bool) {
        let basename = entry.audio_basename(shift_active);
        let path = self.asset_path(lang, &basename);

        match self.play_asset(path).await {
            Ok(()) => {}
            Err(err) if lang != FALLBACK_LANG => {
                debug!("'{}' audio failed ({}), retrying in English", entry.code, err);
                if let Err(fallback_err) = self.play_fallback(entry, shift_active).await {
                    warn!("English fallback for '{}' failed: {}", entry.code, fallback_err);
                }
            }
            Err(err) => {
                warn!("audio playback for '{}' failed: {}", entry.code, err);
            }
        }
    }

    /// Retries a failed play by resolving the same physical key against the
    /// English layout.
    async fn play_fallback(&self, entry: &KeyEntry, shift_active: bool) -> Result<()> {
        let english = self.registry.get(FALLBACK_LANG).await?;
        let Some(en_entry) = english.find_by_code(&entry.code) else {
            return Err(Error::Playback {
                path: self.asset_path(FALLBACK_LANG, &entry.audio_basename(shift_active)),
                reason: format!("no English layout entry for '{}'", entry.code),
            });
        };

        let path = self.asset_path(FALLBACK_LANG, &en_entry.audio_basename(shift_active));
        self.play_asset(path).await
    }

    async fn play_asset(&self, path: PathBuf) -> Result<()> {
        let backend = Arc::clone(&self.backend);
        let join_path = path.clone();
        tokio::task::spawn_blocking(move || backend.play(&path))
            .await
            .map_err(|e| Error::Playback {
                path: join_path,
                reason: format!("playback task failed: {e}"),
            })?
    }
}
