use std::cmp::Reverse;
use std::collections::HashSet;

use jester_logging::{jester_error, jester_info, jester_warn};

use crate::{Item, ItemId, SlotStore, StorageError};

pub const DEFAULT_SLOT_KEY: &str = "jokes";

/// The authoritative joke collection plus its seen-text index.
///
/// Every mutation is applied in memory first and then written through to the
/// slot store as a full overwrite. A failed write is reported to the caller but
/// never rolls back the in-memory change.
#[derive(Debug)]
pub struct CollectionStore<S> {
    slots: S,
    key: String,
    items: Vec<Item>,
    seen: HashSet<String>,
}

impl<S: SlotStore> CollectionStore<S> {
    /// Restores the collection stored under [`DEFAULT_SLOT_KEY`].
    pub fn initialize(slots: S) -> Self {
        Self::initialize_with_key(slots, DEFAULT_SLOT_KEY)
    }

    /// Restores the collection stored under `key`.
    ///
    /// A missing, unreadable or unparseable slot yields an empty collection.
    pub fn initialize_with_key(slots: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let items = match load_items(&slots, &key) {
            Ok(items) => items,
            Err(err) => {
                jester_warn!("Starting with an empty collection: {}", err);
                Vec::new()
            }
        };
        let seen = items.iter().map(|item| item.text.clone()).collect();
        jester_info!("Restored {} jokes from slot {:?}", items.len(), key);
        Self {
            slots,
            key,
            items,
            seen,
        }
    }

    pub fn has_text(&self, text: &str) -> bool {
        self.seen.contains(text)
    }

    /// Appends `batch` in order and persists the whole collection.
    ///
    /// The caller guarantees none of the texts are already present.
    pub fn append_batch(&mut self, batch: Vec<Item>) -> Result<(), StorageError> {
        for item in &batch {
            self.seen.insert(item.text.clone());
        }
        self.items.extend(batch);
        self.persist()
    }

    /// Adds `delta` to the votes of the item with `id`.
    ///
    /// An unknown id is a no-op and does not touch storage.
    pub fn apply_vote_delta(&mut self, id: ItemId, delta: i64) -> Result<(), StorageError> {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            jester_warn!("Vote for unknown joke {} ignored", id);
            return Ok(());
        };
        item.votes = item.votes.saturating_add(delta);
        self.persist()
    }

    /// Items ordered by votes, highest first; ties keep insertion order.
    pub fn snapshot(&self) -> Vec<Item> {
        let mut sorted = self.items.clone();
        sorted.sort_by_key(|item| Reverse(item.votes));
        sorted
    }

    /// Items in insertion (storage) order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn slots(&self) -> &S {
        &self.slots
    }

    pub fn into_slots(self) -> S {
        self.slots
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let content =
            serde_json::to_string(&self.items).map_err(|err| StorageError::WriteFailed {
                key: self.key.clone(),
                message: err.to_string(),
            })?;
        if let Err(err) = self.slots.save(&self.key, &content) {
            jester_error!("Failed to persist {} jokes: {}", self.items.len(), err);
            return Err(err);
        }
        Ok(())
    }
}

fn load_items<S: SlotStore>(slots: &S, key: &str) -> Result<Vec<Item>, StorageError> {
    let Some(content) = slots.load(key)? else {
        return Ok(Vec::new());
    };
    serde_json::from_str(&content).map_err(|err| StorageError::ReadCorrupt {
        key: key.to_string(),
        message: err.to_string(),
    })
}
