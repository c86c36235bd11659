//! Error types for the daily papers pipeline.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//! Everything here is a hard failure; "no usable data" is reported as `None`
//! by the digest functions instead.

/// Errors from fetching the daily papers feed.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// The date argument is not an 8-digit `YYYYMMDD` string.
    #[error("Invalid date {value:?}: {reason}")]
    InvalidInput {
        /// The rejected argument
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Feed answered with a non-2xx status
    #[error("Feed returned status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },

    /// Response body is not valid JSON
    #[error("Failed to parse feed response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Feed URL could not be built
    #[error("Invalid feed URL: {0}")]
    Url(#[from] url::ParseError),
}

impl FetchError {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput { value: value.into(), reason: reason.into() }
    }

    /// Returns true for network failures and non-2xx responses.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }

    /// HTTP status code, if the feed answered with one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Why a feed payload could not be turned into a [`PaperBatch`](crate::models::PaperBatch).
///
/// Validation is all-or-nothing: the first bad element rejects the batch.
#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    /// Payload is not a JSON array
    #[error("Feed payload is not an array")]
    NotAnArray,

    /// Payload is an empty array
    #[error("Feed payload is empty")]
    Empty,

    /// An element failed to parse as `{ paper: { id, title, summary, publishedAt } }`
    #[error("Invalid paper at index {index}: {source}")]
    Record {
        /// Position of the element in the feed
        index: usize,
        /// Underlying deserialization error
        #[source]
        source: serde_json::Error,
    },
}

impl ValidationError {
    /// Returns true when the payload simply had no records.
    #[must_use]
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NotAnArray | Self::Empty)
    }
}

/// Errors from the generative text service.
#[derive(thiserror::Error, Debug)]
pub enum AgentError {
    /// No API key configured
    #[error("Missing API key for the text generation service")]
    MissingApiKey,

    /// Prompt does not fit the agent's context window
    #[error("Prompt needs ~{estimated} tokens, context length is {limit}")]
    ContextOverflow {
        /// Estimated prompt size in tokens
        estimated: usize,
        /// Configured context length
        limit: usize,
    },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-2xx status
    #[error("Completion request failed ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse completion response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Service returned no text
    #[error("Completion response contained no text")]
    EmptyResponse,

    /// Any other failure from a custom generator
    #[error("{0}")]
    Other(String),
}

impl AgentError {
    /// Create a free-form agent error.
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// Errors from the end-to-end summarization run.
#[derive(thiserror::Error, Debug)]
pub enum SummarizeError {
    /// Fetching the feed failed
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The text generation service failed
    #[error("Agent failed: {0}")]
    Agent(#[from] AgentError),
}

/// Result type alias for feed operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Result type alias for agent operations.
pub type AgentResult<T> = Result<T, AgentError>;

/// Result type alias for summarization runs.
pub type SummarizeResult<T> = Result<T, SummarizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_transport_classification() {
        let err = FetchError::Status { status: 503, message: "down".into() };
        assert!(err.is_transport());
        assert_eq!(err.status(), Some(503));

        let err = FetchError::invalid_input("2024-1-2", "expected YYYYMMDD");
        assert!(!err.is_transport());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_invalid_input_message_names_value() {
        let err = FetchError::invalid_input("abcdefgh", "expected 8 digits");
        let msg = err.to_string();
        assert!(msg.contains("abcdefgh"));
        assert!(msg.contains("expected 8 digits"));
    }

    #[test]
    fn test_summarize_error_wraps_sources() {
        let err: SummarizeError = AgentError::EmptyResponse.into();
        assert!(matches!(err, SummarizeError::Agent(AgentError::EmptyResponse)));

        let err: SummarizeError = FetchError::invalid_input("x", "y").into();
        assert!(matches!(err, SummarizeError::Fetch(FetchError::InvalidInput { .. })));
    }

    #[test]
    fn test_context_overflow_message() {
        let err = AgentError::ContextOverflow { estimated: 300, limit: 200 };
        let msg = err.to_string();
        assert!(msg.contains("300"));
        assert!(msg.contains("200"));
    }
}
