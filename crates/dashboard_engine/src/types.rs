use serde::Deserialize;
use thiserror::Error;

/// A campaign as returned by `GET /api/campaigns`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Campaign {
    pub id: u64,
    pub name: String,
}

/// One metrics record, as returned by
/// `GET /api/campaigns/<id>?number=<n>` for poll iteration `n`.
/// Unknown fields in the wire record are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MetricsSample {
    pub impressions: f64,
    pub clicks: f64,
    pub users: f64,
}

/// Classified failure of one fetch round trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Non-success HTTP status or an unparsable body. The display is the
    /// fixed message consumers surface verbatim.
    #[error("Failed to fetch {resource}")]
    RequestFailed { resource: String },
    /// Transport-level rejection, carrying the underlying message.
    #[error("{0}")]
    NetworkFailure(String),
}

impl FetchError {
    pub(crate) fn request_failed(resource: &str) -> Self {
        Self::RequestFailed {
            resource: resource.to_string(),
        }
    }
}
