use crate::ItemId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run one acquisition cycle for `count` new unique jokes.
    Acquire { count: usize },
    ApplyVote { id: ItemId, delta: i64 },
}
