//! Dashboard engine: fetch IO and the polling controller.
mod engine;
mod fetch;
mod poller;
mod types;

pub use engine::DashboardEngine;
pub use fetch::{CampaignListFetcher, CampaignMetricsFetcher, FetchSettings, Fetcher};
pub use poller::{PollOptions, Poller};
pub use types::{Campaign, FetchError, MetricsSample};
