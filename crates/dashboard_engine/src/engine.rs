use std::sync::Arc;

use dashboard_core::{MergeMode, StateStore};

use crate::fetch::{CampaignListFetcher, CampaignMetricsFetcher, FetchSettings};
use crate::poller::{PollOptions, Poller};
use crate::types::{Campaign, FetchError, MetricsSample};

/// The two configured stores behind one dashboard: a one-shot campaign
/// list (replace-mode) and a polling metrics accumulator (append-mode).
///
/// The consumer contract is small by design: `load_campaigns` /
/// `start_metrics` on mount or parameter change, `stop` on teardown,
/// and view reads or subscriptions through the store accessors.
pub struct DashboardEngine {
    campaigns: Poller<Campaign>,
    metrics: Poller<MetricsSample>,
}

impl DashboardEngine {
    pub fn new(base_url: &str, settings: FetchSettings) -> Result<Self, FetchError> {
        let campaigns = Poller::new(
            Arc::new(StateStore::new()),
            Arc::new(CampaignListFetcher::new(base_url, &settings)?),
            MergeMode::Replace,
        );
        let metrics = Poller::new(
            Arc::new(StateStore::new()),
            Arc::new(CampaignMetricsFetcher::new(base_url, &settings)?),
            MergeMode::Append,
        );
        Ok(Self { campaigns, metrics })
    }

    /// One-shot load of the campaign list; no timer is armed.
    pub fn load_campaigns(&self) {
        self.campaigns.start(
            "campaigns",
            PollOptions {
                enable_polling: false,
                ..PollOptions::default()
            },
        );
    }

    /// Starts (or restarts) metrics polling for one campaign.
    pub fn start_metrics(&self, campaign_id: &str, options: PollOptions) {
        self.metrics.start(campaign_id, options);
    }

    /// Stops metrics polling; the accumulated history stays readable.
    pub fn stop_metrics(&self) {
        self.metrics.stop();
    }

    /// Tears down both sessions.
    pub fn stop(&self) {
        self.campaigns.stop();
        self.metrics.stop();
    }

    pub fn campaigns(&self) -> Arc<StateStore<Campaign>> {
        self.campaigns.store()
    }

    pub fn metrics(&self) -> Arc<StateStore<MetricsSample>> {
        self.metrics.store()
    }
}
