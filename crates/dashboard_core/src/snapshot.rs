/// Lifecycle of one fetch/poll session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// No session has run yet.
    #[default]
    Idle,
    /// Initial load in progress; consumers show a skeleton.
    Loading,
    /// Last completed iteration succeeded.
    Ready,
    /// Last completed iteration failed; polling may still continue.
    Failed,
}

/// Immutable record of one resource's entire observable state at an
/// instant. Transitions replace the whole value; fields are never
/// mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    /// Fetched records in arrival order; never reordered or deduplicated.
    pub items: Vec<T>,
    pub status: Status,
    /// Present iff the last completed iteration failed.
    pub error_message: Option<String>,
    /// Number of the most recently merged iteration, counted from 0.
    pub iteration: u64,
}

impl<T> Snapshot<T> {
    /// State before any session has started.
    pub fn idle() -> Self {
        Self {
            items: Vec::new(),
            status: Status::Idle,
            error_message: None,
            iteration: 0,
        }
    }

    /// Session reset: empty items, skeleton up, iteration counter at 0.
    pub fn loading() -> Self {
        Self {
            status: Status::Loading,
            ..Self::idle()
        }
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self::idle()
    }
}
