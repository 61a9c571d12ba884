use crate::{Snapshot, Status};

/// Derived projection consumers render from; computed fresh from the
/// current [`Snapshot`], never stored independently.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceView<T> {
    pub is_loading: bool,
    pub items: Vec<T>,
    pub last_error: Option<String>,
    pub iteration: u64,
}

impl<T: Clone> Snapshot<T> {
    /// Projects the snapshot into the read-only view consumers use.
    pub fn view(&self) -> ResourceView<T> {
        ResourceView {
            is_loading: self.status == Status::Loading,
            items: self.items.clone(),
            last_error: self.error_message.clone(),
            iteration: self.iteration,
        }
    }
}
