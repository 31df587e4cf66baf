use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use jester_core::{CollectionStore, Item, MemorySlotStore, SlotStore, StorageError};
use jester_engine::{AcquireError, FailureKind, FetchController, FetchError, JokeProvider};
use pretty_assertions::assert_eq;

fn init_logging() {
    jester_logging::initialize_for_tests();
}

/// Provider that replays a fixed script of responses and counts calls.
struct ScriptedProvider {
    script: Mutex<VecDeque<Result<String, FetchError>>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|text| Ok(text.to_string())).collect())
    }

    fn new(script: Vec<Result<String, FetchError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl JokeProvider for ScriptedProvider {
    async fn fetch_joke(&self) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::new(FailureKind::Network, "script exhausted")))
    }
}

/// Slot store whose writes always fail.
#[derive(Default)]
struct FullDisk;

impl SlotStore for FullDisk {
    fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn save(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::WriteFailed {
            key: key.to_string(),
            message: "no space left on device".to_string(),
        })
    }
}

fn texts<S: SlotStore>(store: &CollectionStore<S>) -> Vec<String> {
    store.items().iter().map(|item| item.text.clone()).collect()
}

#[tokio::test]
async fn repeated_text_within_a_batch_is_discarded() {
    init_logging();
    let controller = FetchController::new(ScriptedProvider::texts(&["A", "B", "A", "C"]));
    let mut store = CollectionStore::initialize(MemorySlotStore::new());

    let report = controller.acquire(&mut store, 3).await.unwrap();

    assert_eq!(texts(&store), vec!["A", "B", "C"]);
    assert_eq!(controller.provider().calls(), 4);
    assert_eq!(report.added, 3);
    assert_eq!(report.attempts, 4);
    assert_eq!(report.duplicates, 1);
    assert!(report.persisted);
}

#[tokio::test]
async fn text_already_in_collection_is_discarded() {
    init_logging();
    let mut store = CollectionStore::initialize(MemorySlotStore::new());
    store.append_batch(vec![Item::new("A")]).unwrap();

    let controller = FetchController::new(ScriptedProvider::texts(&["A", "D", "E"]));
    let report = controller.acquire(&mut store, 2).await.unwrap();

    assert_eq!(texts(&store), vec!["A", "D", "E"]);
    assert_eq!(controller.provider().calls(), 3);
    assert_eq!(report.duplicates, 1);
}

#[tokio::test]
async fn new_items_are_distinct_fresh_and_persisted_once() {
    init_logging();
    let mut store = CollectionStore::initialize(MemorySlotStore::new());
    store.append_batch(vec![Item::new("old")]).unwrap();
    let before = store.len();

    let controller = FetchController::new(ScriptedProvider::texts(&["x", "y", "x", "old", "z"]));
    controller.acquire(&mut store, 3).await.unwrap();

    assert_eq!(store.len(), before + 3);
    let new_items = &store.items()[before..];
    assert!(new_items.iter().all(|item| item.votes == 0));
    assert_ne!(new_items[0].id, new_items[1].id);
    assert_ne!(new_items[1].id, new_items[2].id);
    assert_ne!(new_items[0].id, new_items[2].id);

    let persisted: Vec<Item> =
        serde_json::from_str(store.slots().get(jester_core::DEFAULT_SLOT_KEY).unwrap()).unwrap();
    assert_eq!(persisted, store.items().to_vec());
}

#[tokio::test]
async fn provider_failure_aborts_without_appending() {
    init_logging();
    let mut store = CollectionStore::initialize(MemorySlotStore::new());
    store.append_batch(vec![Item::new("kept")]).unwrap();
    let before = store.items().to_vec();
    let before_slot = store.slots().get(jester_core::DEFAULT_SLOT_KEY).map(ToOwned::to_owned);

    let controller = FetchController::new(ScriptedProvider::new(vec![
        Ok("B".to_string()),
        Err(FetchError::new(FailureKind::HttpStatus(500), "500 Internal Server Error")),
        Ok("C".to_string()),
    ]));
    let err = controller.acquire(&mut store, 3).await.unwrap_err();

    assert!(matches!(err, AcquireError::ProviderUnavailable(_)));
    assert_eq!(controller.provider().calls(), 2);
    assert_eq!(store.items(), before.as_slice());
    assert!(!store.has_text("B"));
    assert_eq!(
        store.slots().get(jester_core::DEFAULT_SLOT_KEY).map(ToOwned::to_owned),
        before_slot
    );
}

#[tokio::test]
async fn malformed_response_is_reported_as_such() {
    init_logging();
    let mut store = CollectionStore::initialize(MemorySlotStore::new());
    let controller = FetchController::new(ScriptedProvider::new(vec![Err(FetchError::new(
        FailureKind::MalformedResponse,
        "missing field `joke`",
    ))]));

    let err = controller.acquire(&mut store, 1).await.unwrap_err();
    assert!(matches!(err, AcquireError::ProviderMalformedResponse(_)));
    assert!(store.is_empty());
}

#[tokio::test]
async fn always_duplicate_provider_is_bounded() {
    init_logging();
    let mut store = CollectionStore::initialize(MemorySlotStore::new());
    store.append_batch(vec![Item::new("same")]).unwrap();
    let controller = FetchController::new(ScriptedProvider::texts(&["same"; 50]))
        .with_max_attempts_per_item(4);

    let err = controller.acquire(&mut store, 2).await.unwrap_err();

    assert_eq!(
        err,
        AcquireError::ProviderExhausted {
            attempts: 8,
            collected: 0,
            target: 2
        }
    );
    assert_eq!(controller.provider().calls(), 8);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn zero_attempt_limit_means_unbounded() {
    init_logging();
    let mut script = vec!["dup"; 30];
    script.push("fresh");
    let controller =
        FetchController::new(ScriptedProvider::texts(&script)).with_max_attempts_per_item(0);
    let mut store = CollectionStore::initialize(MemorySlotStore::new());
    store.append_batch(vec![Item::new("dup")]).unwrap();

    let report = controller.acquire(&mut store, 1).await.unwrap();
    assert_eq!(report.attempts, 31);
    assert_eq!(report.duplicates, 30);
}

#[tokio::test]
async fn zero_target_makes_no_calls() {
    init_logging();
    let controller = FetchController::new(ScriptedProvider::texts(&["A"]));
    let mut store = CollectionStore::initialize(MemorySlotStore::new());

    let report = controller.acquire(&mut store, 0).await.unwrap();

    assert_eq!(report.added, 0);
    assert_eq!(controller.provider().calls(), 0);
    assert!(store.slots().get(jester_core::DEFAULT_SLOT_KEY).is_none());
}

#[tokio::test]
async fn failed_write_keeps_the_batch_in_memory() {
    init_logging();
    let controller = FetchController::new(ScriptedProvider::texts(&["A", "B"]));
    let mut store = CollectionStore::initialize(FullDisk);

    let report = controller.acquire(&mut store, 2).await.unwrap();

    assert!(!report.persisted);
    assert_eq!(report.added, 2);
    assert_eq!(texts(&store), vec!["A", "B"]);
    assert!(store.has_text("B"));
}
