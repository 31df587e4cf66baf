use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage write failed for slot {key}: {message}")]
    WriteFailed { key: String, message: String },
    #[error("stored value for slot {key} is unreadable: {message}")]
    ReadCorrupt { key: String, message: String },
}

/// Named-slot key-value storage that outlives the process.
///
/// Values are whole documents; every `save` overwrites the previous value.
pub trait SlotStore {
    /// Returns `Ok(None)` when the slot has never been written.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Slot store kept in memory, used for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    slots: HashMap<String, String>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.slots.insert(key.into(), value.into());
        store
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl SlotStore for MemorySlotStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
