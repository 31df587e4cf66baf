#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The collection was restored from storage and the session begins.
    Started { collection_len: usize },
    /// User asked for more jokes; `None` uses the configured batch size.
    FetchRequested { count: Option<usize> },
    /// An acquisition cycle ended with the number of jokes added or an error message.
    AcquireFinished(Result<usize, String>),
    /// User voted on a joke.
    VoteRequested { id: crate::ItemId, delta: i64 },
}
