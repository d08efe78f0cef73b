use crate::app::report::OutputFormat;
use crate::core::query::{
    FeedQuery, OrderBy, DEFAULT_LIMIT, DEFAULT_MIN_MAGNITUDE, USGS_QUERY_ENDPOINT,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{QuakeError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid")
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: USGS_QUERY_ENDPOINT.to_string(),
            timeout_ms: 15_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub min_magnitude: f64,
    pub limit: u32,
    pub order_by: OrderBy,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            min_magnitude: DEFAULT_MIN_MAGNITUDE,
            limit: DEFAULT_LIMIT,
            order_by: OrderBy::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuakeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| QuakeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FEED_ENDPOINT})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl ConfigProvider for TomlConfig {
    fn feed_query(&self) -> FeedQuery {
        FeedQuery::new(self.source.endpoint.clone())
            .with_limit(self.query.limit)
            .with_min_magnitude(self.query.min_magnitude)
            .with_order_by(self.query.order_by)
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(self.source.timeout_ms)
    }

    fn output_format(&self) -> OutputFormat {
        self.output.format
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.endpoint", &self.source.endpoint)?;
        validation::validate_positive_number("source.timeout_ms", self.source.timeout_ms, 1)?;
        validation::validate_range("query.min_magnitude", self.query.min_magnitude, -2.0, 10.0)?;
        validation::validate_range("query.limit", self.query.limit, 1, 20_000)?;
        Ok(())
    }
}
