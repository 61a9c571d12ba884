use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::{Campaign, FetchError, MetricsSample};

/// Client-level knobs shared by both fetchers.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// One network round trip: parsed records for `iteration` of `resource`,
/// or a classified failure. Retry policy lives in the polling
/// controller, not here.
#[async_trait::async_trait]
pub trait Fetcher<T>: Send + Sync {
    async fn fetch(&self, resource: &str, iteration: u64) -> Result<Vec<T>, FetchError>;
}

fn build_client(settings: &FetchSettings) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .build()
        .map_err(|err| FetchError::NetworkFailure(err.to_string()))
}

async fn get_json<V: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    resource: &str,
) -> Result<V, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| FetchError::NetworkFailure(err.to_string()))?;

    if !response.status().is_success() {
        return Err(FetchError::request_failed(resource));
    }

    // Parse failures (and transport errors mid-body) are classified the
    // same as a bad status.
    response
        .json::<V>()
        .await
        .map_err(|_| FetchError::request_failed(resource))
}

/// Fetches the whole collection at `GET <base>/api/<resource>`.
#[derive(Debug, Clone)]
pub struct CampaignListFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl CampaignListFetcher {
    pub fn new(base_url: impl Into<String>, settings: &FetchSettings) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(settings)?,
            base_url: base_url.into(),
        })
    }
}

#[async_trait::async_trait]
impl Fetcher<Campaign> for CampaignListFetcher {
    async fn fetch(&self, resource: &str, _iteration: u64) -> Result<Vec<Campaign>, FetchError> {
        let url = format!("{}/api/{}", self.base_url, resource);
        get_json(&self.client, &url, resource).await
    }
}

/// Fetches one metrics record per iteration at
/// `GET <base>/api/campaigns/<id>?number=<n>`, where the resource
/// identifier is the campaign id.
#[derive(Debug, Clone)]
pub struct CampaignMetricsFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl CampaignMetricsFetcher {
    pub fn new(base_url: impl Into<String>, settings: &FetchSettings) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(settings)?,
            base_url: base_url.into(),
        })
    }
}

#[async_trait::async_trait]
impl Fetcher<MetricsSample> for CampaignMetricsFetcher {
    async fn fetch(&self, resource: &str, iteration: u64) -> Result<Vec<MetricsSample>, FetchError> {
        let url = format!(
            "{}/api/campaigns/{}?number={}",
            self.base_url, resource, iteration
        );
        let sample = get_json::<MetricsSample>(&self.client, &url, "metrics").await?;
        Ok(vec![sample])
    }
}
