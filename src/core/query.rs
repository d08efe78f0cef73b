use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_url};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

pub const USGS_QUERY_ENDPOINT: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";
pub const DEFAULT_LIMIT: u32 = 20;
pub const DEFAULT_MIN_MAGNITUDE: f64 = 6.0;

/// Server-side ordering of the returned events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum OrderBy {
    #[default]
    Time,
    TimeAsc,
    Magnitude,
    MagnitudeAsc,
}

impl OrderBy {
    pub fn as_param(&self) -> &'static str {
        match self {
            OrderBy::Time => "time",
            OrderBy::TimeAsc => "time-asc",
            OrderBy::Magnitude => "magnitude",
            OrderBy::MagnitudeAsc => "magnitude-asc",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// Request parameters for one feed call, passed explicitly instead of read from shared state.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedQuery {
    pub endpoint: String,
    pub limit: u32,
    pub min_magnitude: f64,
    pub order_by: OrderBy,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            endpoint: USGS_QUERY_ENDPOINT.to_string(),
            limit: DEFAULT_LIMIT,
            min_magnitude: DEFAULT_MIN_MAGNITUDE,
            order_by: OrderBy::default(),
        }
    }
}

impl FeedQuery {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_min_magnitude(mut self, min_magnitude: f64) -> Self {
        self.min_magnitude = min_magnitude;
        self
    }

    pub fn with_order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = order_by;
        self
    }

    /// Appends `format`, `limit`, `minmag` and `orderby` to the endpoint, keeping any query it already has.
    pub fn to_url(&self) -> Result<Url> {
        let mut url = validate_url("endpoint", &self.endpoint)?;
        validate_positive_number("limit", u64::from(self.limit), 1)?;

        url.query_pairs_mut()
            .append_pair("format", "geojson")
            .append_pair("limit", &self.limit.to_string())
            .append_pair("minmag", &self.min_magnitude.to_string())
            .append_pair("orderby", self.order_by.as_param());

        Ok(url)
    }
}
