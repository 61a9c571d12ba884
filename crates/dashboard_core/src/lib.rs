//! Dashboard core: pure snapshot state machine, merge policy and view
//! projections, plus the subscription-based state container.
mod merge;
mod snapshot;
mod store;
mod view;

pub use merge::{merge, settle, MergeMode, Outcome};
pub use snapshot::{Snapshot, Status};
pub use store::{StateStore, SubscriptionId};
pub use view::ResourceView;
