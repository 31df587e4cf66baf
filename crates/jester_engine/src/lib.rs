//! Jester engine: joke provider IO, the acquisition loop and file persistence.
mod acquire;
mod fetch;
mod persist;
mod types;

pub use acquire::{FetchController, DEFAULT_MAX_ATTEMPTS_PER_ITEM};
pub use fetch::{FetchSettings, JokeProvider, ReqwestProvider, DEFAULT_ENDPOINT};
pub use persist::{ensure_output_dir, slot_filename, AtomicFileWriter, FileSlotStore, PersistError};
pub use types::{AcquireError, AcquireReport, FailureKind, FetchError};
