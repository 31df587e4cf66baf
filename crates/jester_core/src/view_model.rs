use crate::{AppState, Item, ItemId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub loading: bool,
    pub last_error: Option<String>,
    pub last_added: Option<usize>,
    pub jokes: Vec<JokeRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeRowView {
    pub id: ItemId,
    pub text: String,
    pub votes: i64,
}

impl AppViewModel {
    /// Builds the view from app state and an already sorted collection snapshot.
    pub fn build(state: &AppState, snapshot: &[Item]) -> Self {
        Self {
            loading: state.is_loading(),
            last_error: state.last_error().map(ToOwned::to_owned),
            last_added: state.last_added(),
            jokes: snapshot
                .iter()
                .map(|item| JokeRowView {
                    id: item.id,
                    text: item.text.clone(),
                    votes: item.votes,
                })
                .collect(),
        }
    }
}
