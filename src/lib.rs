pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::report::{render, OutputFormat};
pub use config::TomlConfig;
pub use crate::core::{
    client::FeedClient,
    loader::EarthquakeLoader,
    parser::{FeedParser, TracingSink},
    query::{FeedQuery, OrderBy},
};
pub use domain::model::{EarthquakeRecord, SkipReason, SkippedFeature};
pub use domain::ports::{ConfigProvider, DiagnosticSink, FeedSource};
pub use utils::error::{FeedError, FetchError, ParseError, QuakeError, Result};
