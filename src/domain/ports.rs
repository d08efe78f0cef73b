use crate::app::report::OutputFormat;
use crate::core::query::FeedQuery;
use crate::domain::model::SkippedFeature;
use crate::utils::error::FetchError;
use async_trait::async_trait;
use std::time::Duration;

/// Anything that can hand back the raw bytes of a feed URL.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError>;
}

/// Receives data-quality events for feed entries the parser dropped.
pub trait DiagnosticSink: Send + Sync {
    fn feature_skipped(&self, skipped: &SkippedFeature);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&SkippedFeature) + Send + Sync,
{
    fn feature_skipped(&self, skipped: &SkippedFeature) {
        self(skipped)
    }
}

pub trait ConfigProvider: Send + Sync {
    fn feed_query(&self) -> FeedQuery;
    fn timeout(&self) -> Duration;
    fn output_format(&self) -> OutputFormat;
}
