use crate::domain::model::EarthquakeRecord;
use crate::utils::error::{QuakeError, Result};
use serde::{Deserialize, Serialize};

pub const NO_EARTHQUAKES: &str = "No earthquakes found.";
const LOCATION_SEPARATOR: &str = " of ";
const NEAR_THE: &str = "Near the";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Splits "10km N of Town" into ("10km N of", "Town"); places without an offset get "Near the".
pub fn split_location(place: &str) -> (String, String) {
    match place.split_once(LOCATION_SEPARATOR) {
        Some((offset, primary)) => (format!("{} of", offset), primary.to_string()),
        None => (NEAR_THE.to_string(), place.to_string()),
    }
}

pub fn format_magnitude(magnitude: f64) -> String {
    format!("{:.1}", magnitude)
}

/// Date ("Mar 03, 2001") and time ("4:46 PM") in UTC.
pub fn format_date_time(record: &EarthquakeRecord) -> (String, String) {
    match record.occurred_at() {
        Some(at) => (
            at.format("%b %d, %Y").to_string(),
            at.format("%-I:%M %p").to_string(),
        ),
        None => ("unknown date".to_string(), String::new()),
    }
}

pub fn render(records: &[EarthquakeRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(records)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => render_csv(records),
    }
}

fn render_table(records: &[EarthquakeRecord]) -> String {
    if records.is_empty() {
        return NO_EARTHQUAKES.to_string();
    }

    records
        .iter()
        .map(|record| {
            let (offset, primary) = split_location(&record.place);
            let (date, time) = format_date_time(record);
            format!(
                "{:>5}  {:<20} {:<40} {:>13} {:>8}",
                format_magnitude(record.magnitude),
                offset,
                primary,
                date,
                time
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_csv(records: &[EarthquakeRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if records.is_empty() {
        writer.write_record(["magnitude", "place", "time_millis", "url"])?;
    }
    for record in records {
        writer.serialize(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| QuakeError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        QuakeError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(magnitude: f64, place: &str) -> EarthquakeRecord {
        EarthquakeRecord::new(
            magnitude,
            place.to_string(),
            1_000_000_000_000,
            "https://e/1".to_string(),
        )
    }

    #[test]
    fn test_split_location() {
        assert_eq!(
            split_location("10km N of Town"),
            ("10km N of".to_string(), "Town".to_string())
        );
        assert_eq!(
            split_location("Pacific-Antarctic Ridge"),
            ("Near the".to_string(), "Pacific-Antarctic Ridge".to_string())
        );
    }

    #[test]
    fn test_format_magnitude_and_time() {
        assert_eq!(format_magnitude(5.14), "5.1");
        assert_eq!(format_magnitude(-0.4), "-0.4");

        let (date, time) = format_date_time(&record(5.1, "x"));
        assert_eq!(date, "Sep 09, 2001");
        assert_eq!(time, "1:46 AM");
    }

    #[test]
    fn test_table_reports_empty_results() {
        assert_eq!(render(&[], OutputFormat::Table).unwrap(), NO_EARTHQUAKES);
    }

    #[test]
    fn test_table_row_contents() {
        let out = render(&[record(5.1, "10km N of Town")], OutputFormat::Table).unwrap();

        assert!(out.contains("5.1"));
        assert!(out.contains("10km N of"));
        assert!(out.contains("Town"));
        assert!(out.contains("Sep 09, 2001"));
    }

    #[test]
    fn test_csv_output() {
        let out = render(&[record(5.1, "10km N of Town")], OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "magnitude,place,time_millis,url");
        assert_eq!(lines[1], "5.1,10km N of Town,1000000000000,https://e/1");

        let empty = render(&[], OutputFormat::Csv).unwrap();
        assert_eq!(empty.trim_end(), "magnitude,place,time_millis,url");
    }

    #[test]
    fn test_json_output_is_array() {
        let out = render(&[record(2.5, "Somewhere")], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value[0]["place"], "Somewhere");
        assert_eq!(value[0]["time_millis"], 1_000_000_000_000i64);
    }
}
