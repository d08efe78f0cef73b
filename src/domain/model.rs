use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One earthquake event, built only from a feed entry that carried every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeRecord {
    pub magnitude: f64,
    pub place: String,
    pub time_millis: i64,
    pub url: String,
}

impl EarthquakeRecord {
    pub fn new(magnitude: f64, place: String, time_millis: i64, url: String) -> Self {
        Self {
            magnitude,
            place,
            time_millis,
            url,
        }
    }

    /// `None` when the timestamp falls outside chrono's representable range.
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time_millis)
    }
}

/// Why a feed entry was dropped during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotAnObject,
    MissingProperties,
    MissingField(&'static str),
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotAnObject => write!(f, "feature is not a JSON object"),
            SkipReason::MissingProperties => write!(f, "feature has no properties object"),
            SkipReason::MissingField(field) => write!(f, "missing field '{}'", field),
            SkipReason::WrongType { field, expected } => {
                write!(f, "field '{}' is not {}", field, expected)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFeature {
    /// Position in the feed's `features` array.
    pub index: usize,
    pub reason: SkipReason,
}
