pub const DEFAULT_JOKES_PER_FETCH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    loading: Option<usize>,
    jokes_per_fetch: usize,
    last_error: Option<String>,
    last_added: Option<usize>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_JOKES_PER_FETCH)
    }
}

impl AppState {
    pub fn new(jokes_per_fetch: usize) -> Self {
        Self {
            loading: None,
            jokes_per_fetch,
            last_error: None,
            last_added: None,
            dirty: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// Number of jokes requested by the running acquisition cycle, if any.
    pub fn loading_count(&self) -> Option<usize> {
        self.loading
    }

    pub fn jokes_per_fetch(&self) -> usize {
        self.jokes_per_fetch
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_added(&self) -> Option<usize> {
        self.last_added
    }

    /// Returns whether the state changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn start_loading(&mut self, count: usize) {
        self.loading = Some(count);
        self.dirty = true;
    }

    pub(crate) fn finish_loading(&mut self, result: Result<usize, String>) {
        self.loading = None;
        match result {
            Ok(added) => {
                self.last_added = Some(added);
                self.last_error = None;
            }
            Err(message) => {
                self.last_added = None;
                self.last_error = Some(message);
            }
        }
        self.dirty = true;
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
