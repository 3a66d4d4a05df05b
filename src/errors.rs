// src/errors.rs

use thiserror::Error;

/// Errors raised anywhere in chainwatch.
///
/// Only `Config`, `Io` and `Terminal` ever reach `main`. Everything produced by a poll is
/// reported as a soft failure and the loop carries on.
#[derive(Debug, Error)]
pub enum ChainwatchError {
    #[error("request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("ledger returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse ledger response: {0}")]
    Parse(String),

    #[error("malformed block: {0}")]
    Malformed(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("terminal error: {0}")]
    Terminal(String),
}

impl ChainwatchError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn terminal_error(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// True for failures that are expected to clear up on their own (network blips,
    /// a restarting ledger). Used to pick the log level for a failed poll.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for ChainwatchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

pub type ChainwatchResult<T> = Result<T, ChainwatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        let err = ChainwatchError::Status {
            status: 503,
            body: String::new(),
        };
        assert!(err.is_transient());

        let err = ChainwatchError::Status {
            status: 404,
            body: "not found".into(),
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn json_errors_become_parse_errors() {
        let err: ChainwatchError = serde_json::from_str::<u64>("nope").unwrap_err().into();
        assert!(matches!(err, ChainwatchError::Parse(_)));
    }
}
