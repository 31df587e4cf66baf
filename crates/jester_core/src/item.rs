use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ItemId = Uuid;

/// A single joke with its identity and vote tally.
///
/// `text` doubles as the deduplication key: no two items in a collection share it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub text: String,
    pub votes: i64,
}

impl Item {
    /// Builds a freshly acquired item with a new random id and no votes.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            votes: 0,
        }
    }
}
