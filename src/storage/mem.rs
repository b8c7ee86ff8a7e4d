//! In-memory backend used by unit tests.

use std::collections::BTreeMap;
use std::io::{self, Cursor};

use super::{AssetReader, Storage};

#[derive(Default, Clone)]
pub struct MemStorage {
    files: BTreeMap<String, Vec<u8>>,
    unreadable: Vec<String>,
    offline: bool,
}

fn key(path: &str) -> String {
    path.trim_start_matches('/').to_string()
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn with_file(mut self, path: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.files.insert(key(path), bytes.into());
        self
    }

    /// Register a file that `exists` but fails to open.
    pub fn with_unreadable(mut self, path: &str) -> Self {
        self.files.insert(key(path), Vec::new());
        self.unreadable.push(key(path));
        self
    }
}

impl Storage for MemStorage {
    fn is_available(&self) -> bool {
        !self.offline
    }

    fn exists(&self, path: &str) -> bool {
        !self.offline && self.files.contains_key(&key(path))
    }

    fn open_for_read(&self, path: &str) -> io::Result<AssetReader> {
        let k = key(path);
        if self.offline || self.unreadable.contains(&k) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "unreadable"));
        }
        match self.files.get(&k) {
            Some(bytes) => Ok(Box::new(Cursor::new(bytes.clone()))),
            None => Err(io::Error::new(io::ErrorKind::NotFound, k)),
        }
    }

    fn list(&self, dir: &str) -> Vec<String> {
        let prefix = format!("{}/", key(dir).trim_end_matches('/'));
        self.files
            .keys()
            .filter(|k| k.starts_with(&prefix))
            .cloned()
            .collect()
    }
}
