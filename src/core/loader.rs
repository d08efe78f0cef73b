use crate::core::client::FeedClient;
use crate::core::parser::FeedParser;
use crate::domain::model::EarthquakeRecord;
use crate::domain::ports::FeedSource;
use crate::utils::error::FeedError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);

pub type LoadResult = std::result::Result<Vec<EarthquakeRecord>, FeedError>;

/// Runs one fetch-then-parse cycle per call; holds no state between calls.
pub struct EarthquakeLoader<S: FeedSource = FeedClient> {
    source: Arc<S>,
    parser: FeedParser,
    timeout: Duration,
}

impl<S: FeedSource> Clone for EarthquakeLoader<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            parser: self.parser.clone(),
            timeout: self.timeout,
        }
    }
}

impl EarthquakeLoader<FeedClient> {
    pub fn new() -> Self {
        Self::with_source(FeedClient::new())
    }
}

impl Default for EarthquakeLoader<FeedClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: FeedSource + 'static> EarthquakeLoader<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source: Arc::new(source),
            parser: FeedParser::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_parser(mut self, parser: FeedParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn load(&self, url: &str) -> LoadResult {
        tracing::info!("🌍 Loading earthquake feed from: {}", url);

        let body = self.source.fetch(url, self.timeout).await.map_err(|e| {
            tracing::error!("❌ Feed fetch failed: {}", e);
            FeedError::from(e)
        })?;

        let records = self.parser.parse(&body).map_err(|e| {
            tracing::error!("❌ Feed parse failed: {}", e);
            FeedError::from(e)
        })?;

        tracing::info!("📊 Loaded {} earthquakes", records.len());
        Ok(records)
    }

    /// Runs [`load`](Self::load) on a tokio task and hands the outcome to the returned receiver.
    ///
    /// Dropping the receiver abandons the in-flight request. Must be called inside a tokio runtime.
    pub fn spawn_load(&self, url: impl Into<String>) -> oneshot::Receiver<LoadResult> {
        let (mut tx, rx) = oneshot::channel();
        let loader = self.clone();
        let url = url.into();

        tokio::spawn(async move {
            tokio::select! {
                _ = tx.closed() => {
                    tracing::debug!("Load of {} abandoned by caller", url);
                }
                result = loader.load(&url) => {
                    // The receiver may have gone away right as the load finished.
                    let _ = tx.send(result);
                }
            }
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{FetchError, ParseError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct StaticSource {
        response: std::result::Result<Vec<u8>, FetchError>,
        calls: AtomicUsize,
    }

    impl StaticSource {
        fn ok(body: &str) -> Self {
            Self {
                response: Ok(body.as_bytes().to_vec()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(err: FetchError) -> Self {
            Self {
                response: Err(err),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl FeedSource for StaticSource {
        async fn fetch(
            &self,
            _url: &str,
            _timeout: Duration,
        ) -> std::result::Result<Vec<u8>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    /// Never answers; records whether its in-flight fetch was dropped or finished.
    #[derive(Default)]
    struct HangingSource {
        started: Arc<AtomicBool>,
        dropped: Arc<AtomicBool>,
        completed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl FeedSource for HangingSource {
        async fn fetch(
            &self,
            _url: &str,
            _timeout: Duration,
        ) -> std::result::Result<Vec<u8>, FetchError> {
            let _guard = DropFlag(Arc::clone(&self.dropped));
            self.started.store(true, Ordering::SeqCst);
            std::future::pending::<()>().await;
            self.completed.store(true, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    const FEED: &str = r#"{"features":[
        {"properties":{"mag":4.2,"place":"5km S of Ridge","time":1700000000000,"url":"https://e/1"}},
        {"properties":{"mag":3.1,"place":"Offshore","time":1699990000000,"url":"https://e/2"}}
    ]}"#;

    #[tokio::test]
    async fn test_load_returns_parsed_records() {
        let loader = EarthquakeLoader::with_source(StaticSource::ok(FEED));

        let records = loader.load("http://unused").await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].place, "5km S of Ridge");
        assert_eq!(records[1].magnitude, 3.1);
    }

    #[tokio::test]
    async fn test_load_fetches_exactly_once_on_failure() {
        let loader = EarthquakeLoader::with_source(StaticSource::failing(FetchError::Timeout));

        let result = loader.load("http://unused").await;

        assert_eq!(result, Err(FeedError::Fetch(FetchError::Timeout)));
        assert_eq!(loader.source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_load_surfaces_parse_errors() {
        let loader = EarthquakeLoader::with_source(StaticSource::ok("not json"));

        let result = loader.load("http://unused").await;

        assert!(matches!(
            result,
            Err(FeedError::Parse(ParseError::Malformed { .. }))
        ));
    }

    #[tokio::test]
    async fn test_spawn_load_delivers_result() {
        let loader = EarthquakeLoader::with_source(StaticSource::ok(FEED));

        let records = loader.spawn_load("http://unused").await.unwrap().unwrap();

        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_dropping_receiver_cancels_in_flight_fetch() {
        let source = HangingSource::default();
        let started = Arc::clone(&source.started);
        let dropped = Arc::clone(&source.dropped);
        let completed = Arc::clone(&source.completed);
        let loader = EarthquakeLoader::with_source(source);

        let receiver = loader.spawn_load("http://unused");
        for _ in 0..100 {
            if started.load(Ordering::SeqCst) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(started.load(Ordering::SeqCst));
        assert!(!dropped.load(Ordering::SeqCst));

        drop(receiver);
        for _ in 0..100 {
            if dropped.load(Ordering::SeqCst) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert!(dropped.load(Ordering::SeqCst));
        assert!(!completed.load(Ordering::SeqCst));
    }
}
