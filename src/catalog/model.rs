use crate::audio::Volume;
use crate::input::normalize_token_id;
use crate::storage::BackendKind;

/// One card: a token id bound to a track under the asset root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    /// Track path relative to the catalog's asset root.
    pub track: String,
    pub label: String,
    /// Whether `<asset_root>/<track>.bmp` existed when the catalog was loaded.
    pub has_image: bool,
}

/// Position of an entry in `Catalog::entries`. Stable for the catalog's
/// lifetime since the catalog is never modified after loading.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EntryIndex(pub(super) usize);

impl EntryIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub default_volume: Volume,
    pub asset_root: String,
    /// Track played for unknown tokens and missing assets.
    pub fallback_track: String,
    pub entries: Vec<CatalogEntry>,
    /// Backend the document was read from; assets are resolved there too.
    pub source: BackendKind,
}

impl Catalog {
    pub const DEFAULT_ASSET_ROOT: &'static str = "audiodb";
    pub const DEFAULT_FALLBACK_TRACK: &'static str = "default.mp3";

    /// First entry whose id matches `id` once both are in reader format, so
    /// a card written as `cafe` is found by a reader reporting `CA:FE`.
    pub fn find(&self, id: &str) -> Option<EntryIndex> {
        let wanted = normalize_token_id(id);
        self.entries
            .iter()
            .position(|e| normalize_token_id(&e.id) == wanted)
            .map(EntryIndex)
    }

    pub fn entry(&self, index: EntryIndex) -> Option<&CatalogEntry> {
        self.entries.get(index.0)
    }

    pub fn track_path(&self, entry: &CatalogEntry) -> String {
        asset_path(&self.asset_root, &entry.track)
    }

    pub fn image_path(&self, entry: &CatalogEntry) -> String {
        image_path_for(&asset_path(&self.asset_root, &entry.track))
    }

    pub fn fallback_path(&self) -> String {
        asset_path(&self.asset_root, &self.fallback_track)
    }

    pub fn fallback_image_path(&self) -> String {
        image_path_for(&self.fallback_path())
    }
}

pub(super) fn asset_path(root: &str, file: &str) -> String {
    format!("{root}/{file}")
}

pub(super) fn image_path_for(track_path: &str) -> String {
    format!("{track_path}.bmp")
}
