use crate::{Snapshot, Status};

/// How a successful payload lands in `items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Overwrite the whole list. Used by one-shot list resources.
    Replace,
    /// Extend with the new records. Used by accumulating poll resources.
    Append,
}

/// Completion of one fetch iteration, reduced to what the merge needs:
/// the parsed records, or the failure message to surface.
pub type Outcome<T> = Result<Vec<T>, String>;

/// Pure merge function: applies the completion of iteration `n` to the
/// previous snapshot and returns the next one.
///
/// A completion whose iteration is lower than the recorded one lost the
/// race to a later iteration and is dropped unchanged, so within a
/// session `items` order always matches iteration order. While the
/// initial skeleton gate is up (`status == Loading`) the status is left
/// alone; [`settle`] flips it once the minimum loading duration has
/// passed.
pub fn merge<T: Clone>(
    prev: &Snapshot<T>,
    n: u64,
    outcome: Outcome<T>,
    mode: MergeMode,
) -> Snapshot<T> {
    if n < prev.iteration {
        return prev.clone();
    }
    let gated = prev.status == Status::Loading;
    match outcome {
        Ok(payload) => {
            let items = match mode {
                MergeMode::Replace => payload,
                MergeMode::Append => {
                    let mut items = prev.items.clone();
                    items.extend(payload);
                    items
                }
            };
            Snapshot {
                items,
                status: if gated { Status::Loading } else { Status::Ready },
                error_message: None,
                iteration: n,
            }
        }
        Err(message) => Snapshot {
            items: prev.items.clone(),
            status: if gated { Status::Loading } else { Status::Failed },
            error_message: Some(message),
            // The counter advances on failures too; failed iterations are
            // recorded, they just contribute no record.
            iteration: n,
        },
    }
}

/// Flips the initial `Loading` state to its settled value once the
/// minimum loading duration has elapsed. A no-op for any other status.
pub fn settle<T: Clone>(prev: &Snapshot<T>) -> Snapshot<T> {
    if prev.status != Status::Loading {
        return prev.clone();
    }
    Snapshot {
        status: if prev.error_message.is_some() {
            Status::Failed
        } else {
            Status::Ready
        },
        ..prev.clone()
    }
}
