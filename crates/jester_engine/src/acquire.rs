use std::collections::HashSet;

use jester_core::{CollectionStore, Item, SlotStore};
use jester_logging::{jester_debug, jester_info, jester_warn};

use crate::{AcquireError, AcquireReport, JokeProvider};

/// Provider calls allowed per requested joke before a cycle gives up.
pub const DEFAULT_MAX_ATTEMPTS_PER_ITEM: usize = 10;

/// Drives acquisition cycles: fetches jokes one call at a time until a batch of
/// unique new texts is complete, then hands the batch to the collection.
pub struct FetchController<P> {
    provider: P,
    max_attempts_per_item: usize,
}

impl<P: JokeProvider> FetchController<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            max_attempts_per_item: DEFAULT_MAX_ATTEMPTS_PER_ITEM,
        }
    }

    /// Caps provider calls at `limit * target_count` per cycle; `0` removes the cap.
    pub fn with_max_attempts_per_item(mut self, limit: usize) -> Self {
        self.max_attempts_per_item = limit;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Acquires exactly `target_count` jokes whose text is new to both the
    /// store and the batch, appending them in a single write.
    ///
    /// Any provider failure aborts the cycle with the store untouched. A failed
    /// storage write does not: the jokes stay in memory and the report says so.
    pub async fn acquire<S: SlotStore>(
        &self,
        store: &mut CollectionStore<S>,
        target_count: usize,
    ) -> Result<AcquireReport, AcquireError> {
        if target_count == 0 {
            return Ok(AcquireReport {
                persisted: true,
                ..AcquireReport::default()
            });
        }

        let max_attempts = match self.max_attempts_per_item {
            0 => None,
            limit => Some(limit.saturating_mul(target_count)),
        };
        let mut batch: Vec<Item> = Vec::with_capacity(target_count);
        let mut batch_texts: HashSet<String> = HashSet::with_capacity(target_count);
        let mut attempts = 0;
        let mut duplicates = 0;

        while batch.len() < target_count {
            if max_attempts.is_some_and(|max| attempts >= max) {
                jester_warn!(
                    "Giving up after {} provider calls with {}/{} unique jokes",
                    attempts,
                    batch.len(),
                    target_count
                );
                return Err(AcquireError::ProviderExhausted {
                    attempts,
                    collected: batch.len(),
                    target: target_count,
                });
            }

            attempts += 1;
            let text = self.provider.fetch_joke().await.map_err(|err| {
                jester_warn!("Provider call {} failed: {}", attempts, err);
                AcquireError::from(err)
            })?;

            if store.has_text(&text) || batch_texts.contains(&text) {
                duplicates += 1;
                jester_debug!("Found a duplicate: {}", text);
                continue;
            }
            batch_texts.insert(text.clone());
            batch.push(Item::new(text));
        }

        let added = batch.len();
        let persisted = store.append_batch(batch).is_ok();
        jester_info!(
            "Acquired {} jokes in {} calls ({} duplicates)",
            added,
            attempts,
            duplicates
        );
        Ok(AcquireReport {
            added,
            attempts,
            duplicates,
            persisted,
        })
    }
}
