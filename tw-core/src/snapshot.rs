use crate::error::TidewatchError;
use crate::forecast::SurfRow;
use crate::sample::RawRecord;
use serde::{Deserialize, Serialize};

/// Everything the dashboard renders from, as served by the snapshot endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Indoor sensor documents.
    #[serde(default)]
    pub metrics: Vec<RawRecord>,
    /// Outdoor weather documents.
    #[serde(default)]
    pub weather: Vec<RawRecord>,
    /// Ranked surf forecast documents.
    #[serde(default)]
    pub surf: Vec<SurfRow>,
}

impl Snapshot {
    /// Decode a snapshot from the endpoint's response body.
    pub fn from_json(body: &str) -> Result<Self, TidewatchError> {
        serde_json::from_str(body).map_err(|e| TidewatchError::FetchFailure(e.to_string()))
    }
}
