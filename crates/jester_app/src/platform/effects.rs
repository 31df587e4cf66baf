use jester_core::{CollectionStore, Effect, Msg, SlotStore};
use jester_engine::{FetchController, JokeProvider};
use jester_logging::{jester_info, jester_warn};
use tokio::runtime::Runtime;

/// Executes core effects against the collection and the joke provider.
///
/// Everything runs on the caller's thread: acquisition cycles are driven by a
/// current-thread runtime, so only one provider call is ever in flight.
pub struct EffectRunner<P, S> {
    store: CollectionStore<S>,
    controller: FetchController<P>,
    runtime: Runtime,
}

impl<P: JokeProvider, S: SlotStore> EffectRunner<P, S> {
    pub fn new(store: CollectionStore<S>, controller: FetchController<P>) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            store,
            controller,
            runtime,
        })
    }

    pub fn store(&self) -> &CollectionStore<S> {
        &self.store
    }

    /// Runs one effect and returns the follow-up message, if any.
    pub fn run(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::Acquire { count } => {
                jester_info!("Acquire count={} known={}", count, self.store.len());
                let result = self
                    .runtime
                    .block_on(self.controller.acquire(&mut self.store, count));
                let outcome = match result {
                    Ok(report) => {
                        if !report.persisted {
                            jester_warn!(
                                "{} new jokes are kept for this session only; saving failed",
                                report.added
                            );
                        }
                        Ok(report.added)
                    }
                    Err(err) => Err(err.to_string()),
                };
                Some(Msg::AcquireFinished(outcome))
            }
            Effect::ApplyVote { id, delta } => {
                if self.store.apply_vote_delta(id, delta).is_err() {
                    jester_warn!("Vote on {} is kept for this session only; saving failed", id);
                }
                None
            }
        }
    }
}
