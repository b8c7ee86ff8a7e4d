use std::path::Path;

use lofty::prelude::*;
use lofty::probe::Probe;

use crate::storage::Storage;

/// Title tag of the track at `path`, if it has a non-blank one.
fn track_title(storage: &dyn Storage, path: &str) -> Option<String> {
    let reader = storage.open_for_read(path).ok()?;
    let tagged = Probe::new(reader).guess_file_type().ok()?.read().ok()?;
    let tag = tagged.primary_tag().or_else(|| tagged.first_tag())?;
    let title = tag.title()?;
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Text to show for a playing track: the card's label, else the track's
/// title tag, else its file stem.
pub fn display_title(label: &str, storage: &dyn Storage, path: &str) -> String {
    if !label.trim().is_empty() {
        return label.to_string();
    }
    track_title(storage, path).unwrap_or_else(|| {
        Path::new(path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string()
    })
}
