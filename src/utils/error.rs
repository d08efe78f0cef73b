use thiserror::Error;

/// Transport-level failure of a single feed request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("network unavailable: {detail}")]
    NetworkUnavailable { detail: String },

    #[error("unexpected HTTP status: {code}")]
    BadStatus { code: u16 },

    #[error("I/O error while fetching feed: {detail}")]
    IoError { detail: String },

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },
}

impl FetchError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() || has_no_route(&err) {
            FetchError::NetworkUnavailable {
                detail: err.to_string(),
            }
        } else {
            FetchError::IoError {
                detail: err.to_string(),
            }
        }
    }
}

// Refused or unroutable connections can surface without `is_connect()` set.
fn has_no_route(err: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if is_no_route_kind(io.kind()) {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

fn is_no_route_kind(kind: std::io::ErrorKind) -> bool {
    matches!(
        kind,
        std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::NetworkUnreachable
            | std::io::ErrorKind::HostUnreachable
    )
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed feed: {detail}")]
    Malformed { detail: String },
}

/// Terminal failure of one fetch-then-parse cycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Error, Debug)]
pub enum QuakeError {
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl From<FetchError> for QuakeError {
    fn from(err: FetchError) -> Self {
        QuakeError::Feed(FeedError::Fetch(err))
    }
}

impl From<ParseError> for QuakeError {
    fn from(err: ParseError) -> Self {
        QuakeError::Feed(FeedError::Parse(err))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

impl QuakeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QuakeError::Feed(FeedError::Fetch(FetchError::InvalidRequest { .. })) => {
                ErrorCategory::Configuration
            }
            QuakeError::Feed(FeedError::Fetch(_)) => ErrorCategory::Network,
            QuakeError::Feed(FeedError::Parse(_)) => ErrorCategory::Data,
            QuakeError::ConfigError { .. } | QuakeError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            QuakeError::CsvError(_)
            | QuakeError::IoError(_)
            | QuakeError::SerializationError(_) => ErrorCategory::System,
        }
    }

    /// Message shown to the operator; connectivity loss is kept apart from every other failure.
    pub fn user_friendly_message(&self) -> String {
        match self {
            QuakeError::Feed(FeedError::Fetch(FetchError::NetworkUnavailable { .. })) => {
                "No internet connection.".to_string()
            }
            QuakeError::Feed(FeedError::Fetch(FetchError::Timeout)) => {
                "The earthquake feed did not respond in time.".to_string()
            }
            QuakeError::Feed(FeedError::Fetch(FetchError::BadStatus { code })) => {
                format!("The earthquake feed answered with HTTP {}.", code)
            }
            QuakeError::Feed(FeedError::Parse(_)) => {
                "The earthquake feed returned data that could not be read.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Network => 2,
            ErrorCategory::Data => 3,
            ErrorCategory::System => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, QuakeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_unavailable_is_distinct_from_other_failures() {
        let offline: QuakeError = FetchError::NetworkUnavailable {
            detail: "dns error".to_string(),
        }
        .into();
        let status: QuakeError = FetchError::BadStatus { code: 503 }.into();

        assert_eq!(offline.user_friendly_message(), "No internet connection.");
        assert_ne!(status.user_friendly_message(), offline.user_friendly_message());
        assert_eq!(offline.category(), ErrorCategory::Network);
    }

    #[test]
    fn test_no_route_kinds() {
        assert!(is_no_route_kind(std::io::ErrorKind::ConnectionRefused));
        assert!(is_no_route_kind(std::io::ErrorKind::NetworkUnreachable));
        assert!(is_no_route_kind(std::io::ErrorKind::HostUnreachable));
        assert!(!is_no_route_kind(std::io::ErrorKind::ConnectionReset));
    }

    #[test]
    fn test_config_errors_are_configuration_category() {
        let err = QuakeError::ConfigError {
            message: "TOML parsing error".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_categories_and_exit_codes() {
        let parse: QuakeError = ParseError::Malformed {
            detail: "eof".to_string(),
        }
        .into();
        assert_eq!(parse.category(), ErrorCategory::Data);
        assert_eq!(parse.exit_code(), 3);

        let invalid: QuakeError = FetchError::InvalidRequest {
            reason: "timeout must be greater than zero".to_string(),
        }
        .into();
        assert_eq!(invalid.category(), ErrorCategory::Configuration);
        assert_eq!(invalid.exit_code(), 1);
    }
}
