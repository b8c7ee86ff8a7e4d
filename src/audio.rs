//! Audio collaborator: the output the player drives.
//!
//! The player only talks to `AudioOutput`. `RodioOutput` plays through the
//! host's default device; `Unavailable` stands in when there is none.

mod sink;
mod tags;
mod types;

pub use sink::{AudioError, RodioOutput};
pub use tags::display_title;
pub use types::*;

use tracing::warn;

use crate::storage::Storage;

pub trait AudioOutput {
    fn set_pinout(&mut self, pinout: Pinout);

    fn set_volume(&mut self, volume: Volume);

    /// Open `path` on `storage` and start playing it in place of anything
    /// currently loaded. Returns `false` when the stream is rejected.
    fn connect_and_play(&mut self, storage: &dyn Storage, path: &str) -> bool;

    fn stop(&mut self);

    fn pause_resume(&mut self);

    /// Called once per control-loop iteration. Reports a track that reached
    /// its end since the previous call.
    fn pump(&mut self) -> Option<AudioEvent>;
}

impl<T: AudioOutput + ?Sized> AudioOutput for Box<T> {
    fn set_pinout(&mut self, pinout: Pinout) {
        (**self).set_pinout(pinout)
    }

    fn set_volume(&mut self, volume: Volume) {
        (**self).set_volume(volume)
    }

    fn connect_and_play(&mut self, storage: &dyn Storage, path: &str) -> bool {
        (**self).connect_and_play(storage, path)
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn pause_resume(&mut self) {
        (**self).pause_resume()
    }

    fn pump(&mut self) -> Option<AudioEvent> {
        (**self).pump()
    }
}

/// Output used when no audio device could be opened: every stream is
/// rejected, so playback requests take the failure path.
#[derive(Debug, Default)]
pub struct Unavailable;

impl AudioOutput for Unavailable {
    fn set_pinout(&mut self, _pinout: Pinout) {}

    fn set_volume(&mut self, _volume: Volume) {}

    fn connect_and_play(&mut self, _storage: &dyn Storage, path: &str) -> bool {
        warn!("No audio output device; cannot play {path}");
        false
    }

    fn stop(&mut self) {}

    fn pause_resume(&mut self) {}

    fn pump(&mut self) -> Option<AudioEvent> {
        None
    }
}

#[cfg(test)]
mod tests;
