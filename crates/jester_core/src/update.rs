use jester_logging::{jester_debug, jester_warn};

use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started { collection_len } => {
            if collection_len == 0 && !state.is_loading() {
                jester_debug!("Empty collection at startup; fetching a first batch");
                let count = state.jokes_per_fetch();
                state.start_loading(count);
                vec![Effect::Acquire { count }]
            } else {
                Vec::new()
            }
        }
        Msg::FetchRequested { count } => {
            if state.is_loading() {
                jester_warn!("Fetch requested while a fetch is already running; ignored");
                return (state, Vec::new());
            }
            let count = count.unwrap_or(state.jokes_per_fetch());
            if count == 0 {
                return (state, Vec::new());
            }
            state.start_loading(count);
            vec![Effect::Acquire { count }]
        }
        Msg::AcquireFinished(result) => {
            if state.is_loading() {
                state.finish_loading(result);
            }
            Vec::new()
        }
        Msg::VoteRequested { id, delta } => {
            state.mark_dirty();
            vec![Effect::ApplyVote { id, delta }]
        }
    };

    (state, effects)
}
