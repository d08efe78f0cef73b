use crate::app::report::OutputFormat;
use crate::core::query::{
    FeedQuery, OrderBy, DEFAULT_LIMIT, DEFAULT_MIN_MAGNITUDE, USGS_QUERY_ENDPOINT,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "quake-feed")]
#[command(about = "List recent earthquakes from a GeoJSON feed")]
pub struct CliConfig {
    #[arg(long, default_value = USGS_QUERY_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, default_value_t = DEFAULT_MIN_MAGNITUDE, allow_hyphen_values = true)]
    pub min_magnitude: f64,

    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,

    #[arg(long, value_enum, default_value_t = OrderBy::Time)]
    pub order_by: OrderBy,

    #[arg(long, default_value_t = 15_000, help = "Timeout for the whole request, in milliseconds")]
    pub timeout_ms: u64,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn feed_query(&self) -> FeedQuery {
        FeedQuery::new(self.endpoint.clone())
            .with_limit(self.limit)
            .with_min_magnitude(self.min_magnitude)
            .with_order_by(self.order_by)
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("endpoint", &self.endpoint)?;
        validation::validate_positive_number("timeout_ms", self.timeout_ms, 1)?;
        validation::validate_range("min_magnitude", self.min_magnitude, -2.0, 10.0)?;
        validation::validate_range("limit", self.limit, 1, 20_000)?;
        Ok(())
    }
}
