use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::Snapshot;

/// Identifies one registered listener; pass it back to
/// [`StateStore::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn Fn(&Snapshot<T>) + Send + Sync>;

/// Unified state container: exactly one current snapshot per resource,
/// swapped atomically and published to subscribers.
///
/// Instances are explicitly constructed and owned by whoever manages
/// their lifecycle; there is no process-wide singleton.
pub struct StateStore<T> {
    current: Mutex<Snapshot<T>>,
    listeners: Mutex<BTreeMap<u64, Listener<T>>>,
    next_id: AtomicU64,
}

impl<T: Clone> StateStore<T> {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(Snapshot::idle()),
            listeners: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// The current snapshot. Never blocks on IO; the lock is only ever
    /// held for a clone or a merge closure.
    pub fn read(&self) -> Snapshot<T> {
        self.current.lock().expect("lock state").clone()
    }

    /// Atomically swaps in the snapshot `next` computes from the current
    /// one. The closure runs under the state lock, so it always sees the
    /// latest previous snapshot and concurrent writers cannot lose
    /// updates. Every swap synchronously notifies all subscribers with
    /// the new snapshot, in subscription order.
    pub fn replace_with(&self, next: impl FnOnce(&Snapshot<T>) -> Snapshot<T>) -> Snapshot<T> {
        let mut guard = self.current.lock().expect("lock state");
        let swapped = next(&guard);
        *guard = swapped.clone();
        // The registry lock is taken while the state lock is still held,
        // so racing writers deliver their notifications in swap order.
        let listeners = self.listeners.lock().expect("lock listeners");
        drop(guard);
        // Listeners run with the registry locked; they may read the
        // store but must not subscribe, unsubscribe or publish
        // reentrantly.
        for listener in listeners.values() {
            listener(&swapped);
        }
        swapped
    }

    /// Registers a listener invoked on every swap. Returns the id to
    /// unsubscribe with.
    pub fn subscribe(
        &self,
        listener: impl Fn(&Snapshot<T>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .expect("lock listeners")
            .insert(id, Box::new(listener));
        SubscriptionId(id)
    }

    /// Removes a listener. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.lock().expect("lock listeners").remove(&id.0);
    }
}

impl<T: Clone> Default for StateStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
