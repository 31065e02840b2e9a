//! Bounded, most-recent-first analysis history.
//!
//! The whole sequence is the unit of persistence: every `insert` and
//! `clear` rewrites (or removes) the slot's blob. Persistence is best
//! effort: a failed write is logged and the in-memory list stays
//! authoritative for the rest of the session.

use super::slot::HistorySlot;
use crate::llm::AnalysisResult;

pub const HISTORY_CAPACITY: usize = 10;

/// Read the persisted sequence from a slot.
///
/// Absent, unreadable or corrupt blobs all yield an empty list. Entries
/// whose risk is outside 0-100 are dropped.
pub fn load_entries<S: HistorySlot>(slot: &S) -> Vec<AnalysisResult> {
    let raw = match slot.read() {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::warn!("[HISTORY] Could not read history — starting empty: {}", e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<AnalysisResult>>(&raw) {
        Ok(mut entries) => {
            if entries.len() > HISTORY_CAPACITY {
                log::warn!(
                    "[HISTORY] Persisted history has {} entries — keeping the newest {}",
                    entries.len(),
                    HISTORY_CAPACITY
                );
                entries.truncate(HISTORY_CAPACITY);
            }
            let before = entries.len();
            entries.retain(AnalysisResult::risk_in_range);
            if entries.len() < before {
                log::warn!(
                    "[HISTORY] Dropped {} persisted entries with risk out of range",
                    before - entries.len()
                );
            }
            for entry in &mut entries {
                entry.normalize();
            }
            entries
        }
        Err(e) => {
            log::warn!("[HISTORY] Persisted history is corrupt — starting empty: {}", e);
            Vec::new()
        }
    }
}

/// The analysis history, newest first, capped at `HISTORY_CAPACITY`.
#[derive(Debug)]
pub struct HistoryStore<S> {
    entries: Vec<AnalysisResult>,
    slot: S,
}

impl<S: HistorySlot> HistoryStore<S> {
    /// Restore the store from its slot.
    pub fn load(slot: S) -> Self {
        let entries = load_entries(&slot);
        log::info!("[HISTORY] Loaded {} entries", entries.len());
        Self { entries, slot }
    }

    pub fn entries(&self) -> &[AnalysisResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Prepend `item`, drop anything past capacity, persist, return the list.
    pub fn insert(&mut self, item: AnalysisResult) -> &[AnalysisResult] {
        self.entries.insert(0, item);
        self.entries.truncate(HISTORY_CAPACITY);
        self.persist();
        &self.entries
    }

    pub fn select(&self, index: usize) -> Option<&AnalysisResult> {
        self.entries.get(index)
    }

    /// Empty the list and remove the persisted blob.
    pub fn clear(&mut self) {
        self.entries.clear();
        match self.slot.remove() {
            Ok(()) => log::info!("[HISTORY] Cleared"),
            Err(e) => log::warn!("[HISTORY] Failed to remove persisted history: {}", e),
        }
    }

    fn persist(&self) {
        let blob = match serde_json::to_string(&self.entries) {
            Ok(blob) => blob,
            Err(e) => {
                log::warn!("[HISTORY] Failed to serialize history: {}", e);
                return;
            }
        };
        if let Err(e) = self.slot.write(&blob) {
            log::warn!("[HISTORY] Failed to persist history: {}", e);
        }
    }
}
