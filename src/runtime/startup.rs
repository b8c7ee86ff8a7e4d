use tracing::{debug, info, warn};

use crate::audio::{AudioOutput, RodioOutput, Unavailable};
use crate::catalog::Catalog;
use crate::config::{self, AudioSettings, StorageSettings};
use crate::display::{FrameBuffer, Presenter};
use crate::player::Player;
use crate::storage::{Backends, DirStorage};

pub type DevicePlayer = Player<Box<dyn AudioOutput>, FrameBuffer>;

pub fn open_backends(storage: &StorageSettings) -> Backends {
    let removable = DirStorage::new(&storage.removable_root);
    let onboard = DirStorage::new(&storage.onboard_root);
    debug!(
        "Storage roots: removable {}, onboard {}",
        removable.root().display(),
        onboard.root().display()
    );
    Backends::new(Some(Box::new(removable)), Some(Box::new(onboard)))
}

/// Load and audit the catalog. Without one the device still runs, but
/// ignores tokens.
pub fn load_catalog(backends: &Backends, storage: &StorageSettings) -> Option<Catalog> {
    match Catalog::load(backends, &storage.catalog_path) {
        Ok(catalog) => {
            if let Some(source) = backends.get(catalog.source) {
                catalog.audit(source).log(&catalog);
            }
            Some(catalog)
        }
        Err(e) => {
            warn!("Running without a catalog: {e}");
            None
        }
    }
}

pub fn open_audio(audio: &AudioSettings) -> Box<dyn AudioOutput> {
    let mut output: Box<dyn AudioOutput> = match RodioOutput::open() {
        Ok(o) => Box::new(o),
        Err(e) => {
            warn!("{e}; playback disabled");
            Box::new(Unavailable)
        }
    };
    if let Some(pinout) = audio.pinout {
        output.set_pinout(pinout);
    }
    output
}

pub fn build_player(settings: &config::Settings) -> DevicePlayer {
    let backends = open_backends(&settings.storage);
    let catalog = load_catalog(&backends, &settings.storage);
    let audio = open_audio(&settings.audio);
    let canvas = FrameBuffer::new(settings.display.width, settings.display.height);
    let presenter = Presenter::new(
        settings.display.idle_text.as_str(),
        settings.display.playing_header.as_str(),
    );

    let player = Player::new(catalog, backends, audio, canvas, presenter);
    info!("Ready at volume {}", player.session().volume);
    player
}
