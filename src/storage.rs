//! Storage backends the device reads its catalog and assets from.
//!
//! Two backends exist, tried in a fixed priority order: removable storage
//! first, then onboard storage. Either may be absent. Paths handed to a
//! backend are backend-relative; a leading `/` is ignored.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// A seekable byte stream opened from a backend.
pub trait ReadSeek: Read + Seek + Send + Sync {}

impl<T: Read + Seek + Send + Sync> ReadSeek for T {}

pub type AssetReader = Box<dyn ReadSeek>;

/// Which backend produced a document or asset.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BackendKind {
    Removable,
    Onboard,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Removable => write!(f, "removable storage"),
            Self::Onboard => write!(f, "onboard storage"),
        }
    }
}

pub trait Storage {
    /// Whether the backend is mounted and usable at all.
    fn is_available(&self) -> bool;

    fn exists(&self, path: &str) -> bool;

    fn open_for_read(&self, path: &str) -> io::Result<AssetReader>;

    /// List files below `dir`, as backend-relative paths. Backends that
    /// cannot enumerate return an empty list.
    fn list(&self, _dir: &str) -> Vec<String> {
        Vec::new()
    }
}

/// A backend mounted as a directory on the host filesystem.
#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl Storage for DirStorage {
    fn is_available(&self) -> bool {
        self.root.is_dir()
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }

    fn open_for_read(&self, path: &str) -> io::Result<AssetReader> {
        let file = File::open(self.resolve(path))?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn list(&self, dir: &str) -> Vec<String> {
        let base = self.resolve(dir);
        WalkDir::new(&base)
            .follow_links(true)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                e.path()
                    .strip_prefix(&self.root)
                    .ok()
                    .and_then(|p| p.to_str())
                    .map(|s| s.replace('\\', "/"))
            })
            .collect()
    }
}

/// The ordered set of backends: removable first, onboard second.
pub struct Backends {
    slots: Vec<(BackendKind, Box<dyn Storage>)>,
}

impl Backends {
    pub fn new(removable: Option<Box<dyn Storage>>, onboard: Option<Box<dyn Storage>>) -> Self {
        let mut slots = Vec::new();
        if let Some(s) = removable {
            slots.push((BackendKind::Removable, s));
        }
        if let Some(s) = onboard {
            slots.push((BackendKind::Onboard, s));
        }
        Self { slots }
    }

    /// Backends in priority order, skipping those that are not available.
    pub fn available(&self) -> impl Iterator<Item = (BackendKind, &dyn Storage)> {
        self.slots
            .iter()
            .filter(|(_, s)| s.is_available())
            .map(|(k, s)| (*k, s.as_ref()))
    }

    pub fn get(&self, kind: BackendKind) -> Option<&dyn Storage> {
        self.slots
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, s)| s.as_ref())
    }
}

#[cfg(test)]
pub(crate) mod mem;
