//! Jester core: the joke collection, its persistence seam, and the pure app state machine.
mod collection;
mod effect;
mod item;
mod msg;
mod slot;
mod state;
mod update;
mod view_model;

pub use collection::{CollectionStore, DEFAULT_SLOT_KEY};
pub use effect::Effect;
pub use item::{Item, ItemId};
pub use msg::Msg;
pub use slot::{MemorySlotStore, SlotStore, StorageError};
pub use state::{AppState, DEFAULT_JOKES_PER_FETCH};
pub use update::update;
pub use view_model::{AppViewModel, JokeRowView};
