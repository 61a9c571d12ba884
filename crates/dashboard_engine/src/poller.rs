use std::sync::{Arc, Mutex};
use std::time::Duration;

use dashboard_core::{merge, settle, MergeMode, Snapshot, StateStore};
use dashboard_logging::{poll_debug, poll_info, poll_warn};
use tokio::time::{interval, sleep_until, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::fetch::Fetcher;

/// Session options recognized by [`Poller::start`].
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Arm the repeating timer after the initial load.
    pub enable_polling: bool,
    /// Period between poll iterations.
    pub interval: Duration,
    /// Shortest time the Loading state is shown, so fast responses do
    /// not flicker the skeleton. Applies to the initial load only.
    pub min_loading: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            enable_polling: true,
            interval: Duration::from_millis(5000),
            min_loading: Duration::from_millis(200),
        }
    }
}

/// Drives repeated fetches for one resource into its state store.
///
/// One session at a time: `start` tears down any previous session
/// before arming a new one, and `stop` is an idempotent no-op when
/// nothing is running. Every completion callback checks the session's
/// cancellation token before touching the store, so an in-flight fetch
/// from a stopped session can never write into a later session's state.
pub struct Poller<T> {
    store: Arc<StateStore<T>>,
    fetcher: Arc<dyn Fetcher<T>>,
    mode: MergeMode,
    session: Mutex<Option<CancellationToken>>,
}

impl<T: Clone + Send + Sync + 'static> Poller<T> {
    pub fn new(store: Arc<StateStore<T>>, fetcher: Arc<dyn Fetcher<T>>, mode: MergeMode) -> Self {
        Self {
            store,
            fetcher,
            mode,
            session: Mutex::new(None),
        }
    }

    /// The store this poller writes into. Consumers read views and
    /// subscribe through it.
    pub fn store(&self) -> Arc<StateStore<T>> {
        self.store.clone()
    }

    /// Whether a session handle is currently held, i.e. `start` has run
    /// without a matching `stop`.
    pub fn is_active(&self) -> bool {
        self.session.lock().expect("lock session").is_some()
    }

    /// Begins a session for `resource`: resets the snapshot, dispatches
    /// iteration 0 immediately, then polls on the interval if enabled.
    /// Calling `start` while a session is running stops it first; two
    /// timers are never layered. Must be called within a tokio runtime.
    pub fn start(&self, resource: &str, options: PollOptions) {
        let token = CancellationToken::new();
        {
            let mut session = self.session.lock().expect("lock session");
            if let Some(previous) = session.take() {
                previous.cancel();
            }
            *session = Some(token.clone());
        }

        poll_info!(
            "session start resource={} polling={} interval_ms={} min_loading_ms={}",
            resource,
            options.enable_polling,
            options.interval.as_millis(),
            options.min_loading.as_millis()
        );
        self.store.replace_with(|_| Snapshot::loading());

        let store = self.store.clone();
        let fetcher = self.fetcher.clone();
        let mode = self.mode;
        let resource = resource.to_string();
        tokio::spawn(run_session(store, fetcher, mode, resource, options, token));
    }

    /// Cancels the running session, if any. Safe to call repeatedly and
    /// before the first fetch resolves; accumulated items are untouched
    /// and no tick fires after this returns.
    ///
    /// The snapshot is frozen exactly as it was: nothing merges or
    /// settles after a stop, so stopping during the initial loading
    /// gate leaves `status == Loading` until a later `start` resets it.
    pub fn stop(&self) {
        if let Some(token) = self.session.lock().expect("lock session").take() {
            poll_debug!("session stop");
            token.cancel();
        }
    }
}

async fn run_session<T: Clone + Send + Sync + 'static>(
    store: Arc<StateStore<T>>,
    fetcher: Arc<dyn Fetcher<T>>,
    mode: MergeMode,
    resource: String,
    options: PollOptions,
    token: CancellationToken,
) {
    let started = Instant::now();

    // Iteration 0 fires immediately; the first data point must not wait
    // out a full interval. It runs as its own task so a slow initial
    // response cannot hold up the timer ticks below.
    {
        let store = store.clone();
        let fetcher = fetcher.clone();
        let resource = resource.clone();
        let token = token.clone();
        let gate = started + options.min_loading;
        tokio::spawn(async move {
            run_iteration(&store, fetcher.as_ref(), mode, &resource, 0, &token).await;
            // Hold the skeleton until `min_loading` has elapsed from
            // session start, then settle Loading to its final status.
            tokio::select! {
                _ = token.cancelled() => return,
                _ = sleep_until(gate) => {}
            }
            // The token is re-checked inside the closure, under the
            // state lock, so a concurrent stop/start cannot cancel
            // between the check and the write.
            store.replace_with(|prev| {
                if token.is_cancelled() {
                    prev.clone()
                } else {
                    settle(prev)
                }
            });
        });
    }

    if !options.enable_polling {
        return;
    }

    let mut ticker = interval(options.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // An interval's first tick completes immediately; iteration 0 is
    // already in flight, so consume it.
    ticker.tick().await;

    let mut iteration: u64 = 0;
    loop {
        tokio::select! {
            _ = token.cancelled() => return,
            _ = ticker.tick() => {}
        }
        iteration += 1;

        // Each tick dispatches its own fetch task; a slow iteration does
        // not delay the next tick, and stale completions are handled by
        // the merge guard.
        let store = store.clone();
        let fetcher = fetcher.clone();
        let resource = resource.clone();
        let token = token.clone();
        tokio::spawn(async move {
            run_iteration(&store, fetcher.as_ref(), mode, &resource, iteration, &token).await;
        });
    }
}

async fn run_iteration<T: Clone>(
    store: &StateStore<T>,
    fetcher: &dyn Fetcher<T>,
    mode: MergeMode,
    resource: &str,
    iteration: u64,
    token: &CancellationToken,
) {
    let result = tokio::select! {
        _ = token.cancelled() => return,
        result = fetcher.fetch(resource, iteration) => result,
    };
    let outcome = match result {
        Ok(payload) => Ok(payload),
        Err(err) => {
            // A failed iteration is recorded but never stops the session.
            poll_warn!("fetch failed resource={} iteration={}: {}", resource, iteration, err);
            Err(err.to_string())
        }
    };
    // Checked under the state lock: either this write precedes a
    // restarting session's reset (which wipes it) or it observes the
    // cancelled token and leaves the snapshot alone. A stale completion
    // can never land in a later session's state.
    store.replace_with(|prev| {
        if token.is_cancelled() {
            prev.clone()
        } else {
            merge(prev, iteration, outcome, mode)
        }
    });
}
