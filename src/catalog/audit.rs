//! Startup consistency check between the catalog and its backend.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::storage::Storage;

use super::model::{Catalog, EntryIndex};

/// What the audit found. Purely informational: the catalog is not changed.
#[derive(Debug, Default)]
pub struct AuditReport {
    /// Entries whose track file does not exist.
    pub missing_tracks: Vec<EntryIndex>,
    /// Files under the asset root that no entry (or the fallback) refers to.
    pub unreferenced: Vec<String>,
}

fn normalize(path: &str) -> &str {
    path.trim_start_matches('/')
}

impl Catalog {
    pub fn audit(&self, storage: &dyn Storage) -> AuditReport {
        let mut report = AuditReport::default();
        let mut referenced: BTreeSet<String> = BTreeSet::new();

        for (pos, entry) in self.entries.iter().enumerate() {
            let track = self.track_path(entry);
            if !storage.exists(&track) {
                report.missing_tracks.push(EntryIndex(pos));
            }
            referenced.insert(normalize(&track).to_string());
            referenced.insert(normalize(&self.image_path(entry)).to_string());
        }
        referenced.insert(normalize(&self.fallback_path()).to_string());
        referenced.insert(normalize(&self.fallback_image_path()).to_string());

        report.unreferenced = storage
            .list(&self.asset_root)
            .into_iter()
            .filter(|p| !referenced.contains(normalize(p)))
            .collect();
        report
    }
}

impl AuditReport {
    pub fn log(&self, catalog: &Catalog) {
        for index in &self.missing_tracks {
            if let Some(entry) = catalog.entry(*index) {
                warn!(
                    "Card {} refers to missing track {}",
                    entry.id,
                    catalog.track_path(entry)
                );
            }
        }
        for path in &self.unreferenced {
            debug!("Asset {path} is not referenced by any card");
        }
    }
}
