use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request could not be built. Nothing was sent.
    Construction,
    /// The request exceeded the client timeout before a response arrived.
    Timeout,
    /// The API answered with an error, or could not be reached at all.
    Api,
    /// A token symbol did not resolve to exactly one token.
    Resolution,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("required parameter: {0}")]
    MissingParam(&'static str),

    #[error("invalid amount '{amount}': {reason}")]
    InvalidAmount { amount: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("{message}")]
    Timeout {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{message}")]
    Api {
        message: String,
        status: Option<StatusCode>,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("token not found: {0}")]
    TokenNotFound(String),

    #[error("token symbol '{symbol}' matches {count} tokens")]
    AmbiguousToken { symbol: String, count: usize },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingParam(_) | Error::InvalidAmount { .. } | Error::Transport(_) => {
                ErrorKind::Construction
            }
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::Api { .. } => ErrorKind::Api,
            Error::TokenNotFound(_) | Error::AmbiguousToken { .. } => ErrorKind::Resolution,
        }
    }

    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => *status,
            _ => None,
        }
    }

    pub(crate) fn invalid_amount(amount: &str, reason: impl ToString) -> Self {
        Error::InvalidAmount {
            amount: amount.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Classify a failure that happened before any response was received.
pub(crate) fn classify_send_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout {
            message: err.to_string(),
            source: err,
        }
    } else {
        Error::Api {
            message: err.to_string(),
            status: None,
            source: Some(err),
        }
    }
}

/// Pull the `message` field out of an API error body.
pub(crate) fn error_body_message(body: &str) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(body).ok()?;
    parsed
        .get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(String::from)
}
