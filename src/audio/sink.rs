//! `rodio`-backed output.
//!
//! One `Sink` per started track; dropping back to `None` on stop. A sink that
//! drains on its own is reported from `pump` as a finished track.

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use thiserror::Error;
use tracing::{debug, warn};

use crate::storage::Storage;

use super::AudioOutput;
use super::types::{AudioEvent, Pinout, Volume};

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    Device(String),
}

pub struct RodioOutput {
    stream: OutputStream,
    sink: Option<Sink>,
    current: Option<String>,
    gain: f32,
}

impl RodioOutput {
    pub fn open() -> Result<Self, AudioError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| AudioError::Device(e.to_string()))?;
        // rodio logs to stderr when the stream is dropped, which garbles the TUI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            current: None,
            gain: Volume::default().gain(),
        })
    }
}

impl AudioOutput for RodioOutput {
    fn set_pinout(&mut self, pinout: Pinout) {
        debug!(
            "Host output ignores pinout bclk={} lrclk={} dout={}",
            pinout.bclk, pinout.lrclk, pinout.dout
        );
    }

    fn set_volume(&mut self, volume: Volume) {
        self.gain = volume.gain();
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(self.gain);
        }
    }

    fn connect_and_play(&mut self, storage: &dyn Storage, path: &str) -> bool {
        let reader = match storage.open_for_read(path) {
            Ok(r) => r,
            Err(e) => {
                warn!("Cannot open {path}: {e}");
                return false;
            }
        };
        let source = match Decoder::new(reader) {
            Ok(s) => s,
            Err(e) => {
                warn!("Cannot decode {path}: {e}");
                return false;
            }
        };

        self.stop();
        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.gain);
        sink.append(source);
        self.sink = Some(sink);
        self.current = Some(path.to_string());
        true
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.current = None;
    }

    fn pause_resume(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            if sink.is_paused() {
                sink.play();
            } else {
                sink.pause();
            }
        }
    }

    fn pump(&mut self) -> Option<AudioEvent> {
        let drained = self.sink.as_ref().is_some_and(Sink::empty);
        if !drained {
            return None;
        }
        self.sink = None;
        self.current.take().map(|path| AudioEvent::Finished { path })
    }
}
