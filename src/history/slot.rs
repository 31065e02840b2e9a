//! Persistence slots for the history blob.
//!
//! A slot holds one JSON string under one name. `FileSlot` keeps it in
//! `<data dir>/phishguard/phishGuardHistory.json`; `MemorySlot` keeps it
//! in process and is what tests and embedders use.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const HISTORY_SLOT_NAME: &str = "phishGuardHistory";

/// One named storage slot, replaced whole on every write.
pub trait HistorySlot {
    /// The stored blob, or `None` if nothing has been written.
    fn read(&self) -> io::Result<Option<String>>;
    fn write(&self, blob: &str) -> io::Result<()>;
    /// Removing an absent blob is not an error.
    fn remove(&self) -> io::Result<()>;
}

/// Directory where PhishGuard keeps its data.
fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("phishguard")
}

/// File-backed slot. Writes go to a sibling temp file and are renamed
/// into place, so readers see either the old or the new blob.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> PathBuf {
        data_dir().join(format!("{}.json", HISTORY_SLOT_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| HISTORY_SLOT_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for FileSlot {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl HistorySlot for FileSlot {
    fn read(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, blob: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.temp_path();
        std::fs::write(&tmp, blob)?;
        std::fs::rename(&tmp, &self.path)
    }

    fn remove(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// In-process slot. Clones share the same blob.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    blob: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with a blob, as if an earlier session had written it.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Arc::new(Mutex::new(Some(blob.into()))),
        }
    }

    pub fn blob(&self) -> Option<String> {
        self.blob.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl HistorySlot for MemorySlot {
    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.blob())
    }

    fn write(&self, blob: &str) -> io::Result<()> {
        *self.blob.lock().unwrap_or_else(|e| e.into_inner()) = Some(blob.to_string());
        Ok(())
    }

    fn remove(&self) -> io::Result<()> {
        *self.blob.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}
