//! Player model types: `Player`, `PlaybackSession` and `PlaybackState`.

use tracing::{debug, info, warn};

use crate::audio::{self, AudioEvent, AudioOutput, Volume};
use crate::catalog::{Catalog, CatalogEntry, EntryIndex};
use crate::display::{Canvas, Presenter};
use crate::input::Command;
use crate::storage::{BackendKind, Backends};

use super::status::StatusReport;

/// The playback state of the device.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSession {
    pub state: PlaybackState,
    pub volume: Volume,
    /// Entry whose track was last started. Survives play/pause and Stop;
    /// cleared when a track finishes or fails to start, and on fallback.
    pub active_entry: Option<EntryIndex>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    UnknownToken,
    MissingTrack,
}

/// What a play request ended up doing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    Started(EntryIndex),
    Fallback(FallbackReason),
    /// The output rejected the stream.
    Failed,
    /// No catalog was loaded at startup.
    Unconfigured,
}

/// Everything `play_entry` needs, copied out of the catalog.
struct Resolved {
    source: BackendKind,
    track: String,
    image: Option<String>,
    label: String,
}

pub struct Player<A, C> {
    catalog: Option<Catalog>,
    backends: Backends,
    session: PlaybackSession,
    audio: A,
    canvas: C,
    presenter: Presenter,
}

impl<A: AudioOutput, C: Canvas> Player<A, C> {
    /// Create a player around an optional catalog. Applies the catalog's
    /// default volume and shows the idle presentation.
    pub fn new(
        catalog: Option<Catalog>,
        backends: Backends,
        mut audio: A,
        mut canvas: C,
        presenter: Presenter,
    ) -> Self {
        let volume = catalog
            .as_ref()
            .map(|c| c.default_volume)
            .unwrap_or_default();
        audio.set_volume(volume);
        presenter.show_idle(&mut canvas);

        Self {
            catalog,
            backends,
            session: PlaybackSession {
                state: PlaybackState::Idle,
                volume,
                active_entry: None,
            },
            audio,
            canvas,
            presenter,
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn active_entry(&self) -> Option<&CatalogEntry> {
        let index = self.session.active_entry?;
        self.catalog.as_ref()?.entry(index)
    }

    /// Handle a scanned token.
    pub fn play(&mut self, token_id: &str) -> PlayOutcome {
        let Some(catalog) = self.catalog.as_ref() else {
            warn!("No catalog loaded; ignoring token {token_id}");
            return PlayOutcome::Unconfigured;
        };

        match catalog.find(token_id) {
            Some(index) => self.play_entry(index),
            None => {
                info!("No audio entry found with id {token_id}");
                self.play_fallback(FallbackReason::UnknownToken)
            }
        }
    }

    fn resolve(&self, index: EntryIndex) -> Option<Resolved> {
        let catalog = self.catalog.as_ref()?;
        let entry = catalog.entry(index)?;
        Some(Resolved {
            source: catalog.source,
            track: catalog.track_path(entry),
            image: entry.has_image.then(|| catalog.image_path(entry)),
            label: entry.label.clone(),
        })
    }

    fn play_entry(&mut self, index: EntryIndex) -> PlayOutcome {
        let Some(resolved) = self.resolve(index) else {
            return PlayOutcome::Unconfigured;
        };

        let track_exists = self
            .backends
            .get(resolved.source)
            .is_some_and(|s| s.exists(&resolved.track));
        if !track_exists {
            warn!("Audio file not found: {}", resolved.track);
            return self.play_fallback(FallbackReason::MissingTrack);
        }

        // Hard cut: no overlap between the old and new stream.
        if self.session.state != PlaybackState::Idle {
            self.audio.stop();
        }

        let Some(storage) = self.backends.get(resolved.source) else {
            return PlayOutcome::Failed;
        };

        if !self.audio.connect_and_play(storage, &resolved.track) {
            self.session.state = PlaybackState::Idle;
            self.session.active_entry = None;
            self.presenter.show_idle(&mut self.canvas);
            warn!("Failed to start audio {}", resolved.track);
            return PlayOutcome::Failed;
        }

        self.session.active_entry = Some(index);
        self.session.state = PlaybackState::Playing;

        match resolved.image {
            Some(image) => {
                if let Err(e) = self
                    .presenter
                    .draw_centered_bitmap(&mut self.canvas, storage, &image)
                {
                    warn!("Skipping picture {image}: {e}");
                }
            }
            None => {
                let title = audio::display_title(&resolved.label, storage, &resolved.track);
                self.presenter.show_playing(&mut self.canvas, &title);
            }
        }

        info!(
            "Audio started successfully: {} (card #{})",
            resolved.track,
            index.get()
        );
        PlayOutcome::Started(index)
    }

    /// Play the catalog's fallback track. The session ends up idle with no
    /// active entry whatever was playing before.
    fn play_fallback(&mut self, reason: FallbackReason) -> PlayOutcome {
        let Some(catalog) = self.catalog.as_ref() else {
            return PlayOutcome::Unconfigured;
        };
        let source = catalog.source;
        let track = catalog.fallback_path();
        let image = catalog.fallback_image_path();

        if self.session.state != PlaybackState::Idle {
            self.audio.stop();
        }
        self.session.state = PlaybackState::Idle;
        self.session.active_entry = None;

        let Some(storage) = self.backends.get(source) else {
            return PlayOutcome::Fallback(reason);
        };

        if storage.exists(&image) {
            if let Err(e) = self
                .presenter
                .draw_centered_bitmap(&mut self.canvas, storage, &image)
            {
                warn!("Skipping picture {image}: {e}");
            }
        } else {
            self.presenter.show_idle(&mut self.canvas);
        }

        if !self.audio.connect_and_play(storage, &track) {
            warn!("Failed to start fallback track {track}");
        }
        PlayOutcome::Fallback(reason)
    }

    /// Pause, resume, or replay the active entry. Returns the new state.
    pub fn toggle_play_pause(&mut self) -> PlaybackState {
        match self.session.state {
            PlaybackState::Paused => {
                self.audio.pause_resume();
                self.session.state = PlaybackState::Playing;
                info!("Audio resumed");
            }
            PlaybackState::Playing => {
                self.audio.pause_resume();
                self.session.state = PlaybackState::Paused;
                info!("Audio paused");
            }
            PlaybackState::Idle => match self.session.active_entry {
                Some(index) => {
                    self.play_entry(index);
                }
                None => debug!("Nothing to resume"),
            },
        }
        self.session.state
    }

    /// Stop playback. Only acts while playing; returns whether it did.
    pub fn stop(&mut self) -> bool {
        if self.session.state != PlaybackState::Playing {
            info!("No audio is currently playing");
            return false;
        }
        self.audio.stop();
        self.session.state = PlaybackState::Idle;
        self.presenter.show_idle(&mut self.canvas);
        info!("Audio stopped");
        true
    }

    pub fn increment_volume(&mut self) -> Volume {
        if let Some(v) = self.session.volume.incremented() {
            self.set_volume(v);
        }
        self.session.volume
    }

    pub fn decrement_volume(&mut self) -> Volume {
        if let Some(v) = self.session.volume.decremented() {
            self.set_volume(v);
        }
        self.session.volume
    }

    fn set_volume(&mut self, volume: Volume) {
        self.session.volume = volume;
        self.audio.set_volume(volume);
        debug!("Volume {volume}");
    }

    /// The current track ended on its own. Applies in every state.
    pub fn on_playback_finished(&mut self) {
        self.session.state = PlaybackState::Idle;
        self.session.active_entry = None;
        self.presenter.show_idle(&mut self.canvas);
        info!("Song finished - state set to idle");
    }

    /// Give the audio output its per-iteration slice and apply any event it
    /// reports.
    pub fn pump(&mut self) {
        if let Some(AudioEvent::Finished { path }) = self.audio.pump() {
            debug!("Audio finished: {path}");
            self.on_playback_finished();
        }
    }

    pub fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::TogglePlayPause => {
                self.toggle_play_pause();
            }
            Command::VolumeUp => {
                self.increment_volume();
            }
            Command::VolumeDown => {
                self.decrement_volume();
            }
            Command::Stop => {
                self.stop();
            }
            Command::Status => {
                for line in self.status().to_string().lines() {
                    info!("{line}");
                }
            }
        }
    }

    pub fn status(&self) -> StatusReport {
        StatusReport {
            volume: self.session.volume,
            state: self.session.state,
            active: self
                .active_entry()
                .map(|e| (e.label.clone(), e.id.clone())),
            cards: self.catalog.as_ref().map(|c| c.entries.len()),
        }
    }

    #[cfg(test)]
    pub(crate) fn audio(&self) -> &A {
        &self.audio
    }

    #[cfg(test)]
    pub(crate) fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }
}
