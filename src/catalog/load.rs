use std::io::Read;

use serde_yaml::Value;
use tracing::{debug, info, warn};

use crate::audio::Volume;
use crate::storage::{BackendKind, Backends, Storage};

use super::error::LoadError;
use super::model::{Catalog, CatalogEntry, asset_path, image_path_for};

impl Catalog {
    /// Load the catalog document at `path`.
    ///
    /// Backends are tried in priority order; the first available backend on
    /// which `path` exists wins, and assets are probed on that same backend.
    pub fn load(backends: &Backends, path: &str) -> Result<Self, LoadError> {
        for (kind, storage) in backends.available() {
            if !storage.exists(path) {
                debug!("{path} not present on {kind}");
                continue;
            }

            info!("Loading catalog from {kind}");
            let text = read_document(storage, path)?;
            return Self::parse(&text, storage, kind);
        }

        warn!("Catalog document {path} not found");
        Err(LoadError::NotFound {
            path: path.to_string(),
        })
    }

    /// Build a catalog from document text.
    ///
    /// Missing or non-scalar top-level fields silently take their defaults.
    /// Cards that are not mappings, or lack a non-empty `id` or `file`, are
    /// dropped.
    pub fn parse(
        text: &str,
        storage: &dyn Storage,
        source: BackendKind,
    ) -> Result<Self, LoadError> {
        let root: Value =
            serde_yaml::from_str(text).map_err(|e| LoadError::ParseError(e.to_string()))?;

        let default_volume = volume_field(root.get("default_volume"));
        let asset_root = scalar(root.get("audiodb_path"))
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| Self::DEFAULT_ASSET_ROOT.to_string());
        let fallback_track = scalar(root.get("unknown_card_sfx"))
            .unwrap_or_else(|| Self::DEFAULT_FALLBACK_TRACK.to_string());

        let mut entries = Vec::new();
        if let Some(Value::Sequence(cards)) = root.get("cards") {
            for (pos, node) in cards.iter().enumerate() {
                if !node.is_mapping() {
                    debug!("Skipping card #{pos}: not a mapping");
                    continue;
                }

                let id = scalar(node.get("id")).unwrap_or_default();
                let track = scalar(node.get("file")).unwrap_or_default();
                if id.is_empty() || track.is_empty() {
                    debug!("Skipping card #{pos}: id and file are required");
                    continue;
                }

                let has_image = storage.exists(&image_path_for(&asset_path(&asset_root, &track)));
                entries.push(CatalogEntry {
                    id,
                    track,
                    label: scalar(node.get("name")).unwrap_or_default(),
                    has_image,
                });
            }
        }

        let catalog = Self {
            default_volume,
            asset_root,
            fallback_track,
            entries,
            source,
        };
        catalog.log_summary();
        Ok(catalog)
    }

    fn log_summary(&self) {
        info!(
            "Catalog loaded: volume {}, asset root {}, fallback {}, {} cards",
            self.default_volume,
            self.asset_root,
            self.fallback_track,
            self.entries.len()
        );
        for entry in &self.entries {
            debug!(
                "  id={} file={} name={} image={}",
                entry.id, entry.track, entry.label, entry.has_image
            );
        }
    }
}

fn read_document(storage: &dyn Storage, path: &str) -> Result<String, LoadError> {
    let mut bytes = Vec::new();
    storage
        .open_for_read(path)
        .and_then(|mut r| r.read_to_end(&mut bytes))
        .map_err(|e| LoadError::ParseError(format!("failed to read {path}: {e}")))?;

    String::from_utf8(bytes).map_err(|e| LoadError::ParseError(format!("{path}: {e}")))
}

/// Render a scalar node as text; `None` for absent, null and collection nodes.
fn scalar(node: Option<&Value>) -> Option<String> {
    match node? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn volume_field(node: Option<&Value>) -> Volume {
    let raw = match node {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    raw.map(Volume::clamped).unwrap_or_default()
}
