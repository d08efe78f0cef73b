use crate::domain::model::{EarthquakeRecord, SkipReason, SkippedFeature};
use crate::domain::ports::DiagnosticSink;
use crate::utils::error::ParseError;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Default sink: every dropped feature becomes a `warn` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn feature_skipped(&self, skipped: &SkippedFeature) {
        tracing::warn!(
            "⚠️ Skipping feature #{}: {}",
            skipped.index,
            skipped.reason
        );
    }
}

/// Turns a GeoJSON feature collection into earthquake records, dropping entries it cannot trust.
#[derive(Clone)]
pub struct FeedParser {
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for FeedParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedParser {
    pub fn new() -> Self {
        Self {
            sink: Arc::new(TracingSink),
        }
    }

    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { sink }
    }

    pub fn parse(&self, bytes: &[u8]) -> Result<Vec<EarthquakeRecord>, ParseError> {
        let root: Value = serde_json::from_slice(bytes).map_err(|e| ParseError::Malformed {
            detail: e.to_string(),
        })?;

        let Value::Object(root) = root else {
            return Err(ParseError::Malformed {
                detail: "top-level value is not a JSON object".to_string(),
            });
        };

        let features = match root.get("features") {
            None => {
                tracing::debug!("Feed has no 'features' key, treating as empty");
                return Ok(Vec::new());
            }
            Some(Value::Array(features)) => features,
            Some(_) => {
                return Err(ParseError::Malformed {
                    detail: "'features' is not an array".to_string(),
                });
            }
        };

        let mut records = Vec::with_capacity(features.len());
        for (index, feature) in features.iter().enumerate() {
            match extract_record(feature) {
                Ok(record) => records.push(record),
                Err(reason) => self
                    .sink
                    .feature_skipped(&SkippedFeature { index, reason }),
            }
        }

        tracing::debug!(
            "Parsed {} of {} features",
            records.len(),
            features.len()
        );
        Ok(records)
    }
}

fn extract_record(feature: &Value) -> Result<EarthquakeRecord, SkipReason> {
    let feature = feature.as_object().ok_or(SkipReason::NotAnObject)?;
    let properties = feature
        .get("properties")
        .and_then(Value::as_object)
        .ok_or(SkipReason::MissingProperties)?;

    let magnitude = required(properties, "mag")?
        .as_f64()
        .ok_or(SkipReason::WrongType {
            field: "mag",
            expected: "a number",
        })?;
    let place = required(properties, "place")?
        .as_str()
        .ok_or(SkipReason::WrongType {
            field: "place",
            expected: "a string",
        })?;
    let time_millis = required(properties, "time")?
        .as_i64()
        .ok_or(SkipReason::WrongType {
            field: "time",
            expected: "an integer",
        })?;
    let url = required(properties, "url")?
        .as_str()
        .ok_or(SkipReason::WrongType {
            field: "url",
            expected: "a string",
        })?;

    Ok(EarthquakeRecord::new(
        magnitude,
        place.to_string(),
        time_millis,
        url.to_string(),
    ))
}

// A JSON null counts as absent.
fn required<'a>(properties: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value, SkipReason> {
    match properties.get(field) {
        None | Some(Value::Null) => Err(SkipReason::MissingField(field)),
        Some(value) => Ok(value),
    }
}
