//! History domain — bounded local record of past analyses.
//!
//! `store.rs` owns ordering, capacity and the persist-on-mutation rule;
//! `slot.rs` owns where the blob lives.

pub mod slot;
pub mod store;

pub use slot::{FileSlot, HistorySlot, MemorySlot, HISTORY_SLOT_NAME};
pub use store::{load_entries, HistoryStore, HISTORY_CAPACITY};
