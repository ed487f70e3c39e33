use thiserror::Error;

/// Errors raised while talking to a language-model provider
#[derive(Error, Debug)]
pub enum LlmError {
    /// Authentication failed (HTTP 401/403)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        retry_after: Option<u64>,
    },

    /// Invalid request parameters (HTTP 400)
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// API error with status code (HTTP 4xx/5xx except above)
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The request did not complete within the client timeout
    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Network or connection error
    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    /// JSON parsing or serialization error
    #[error("Parse error: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    /// The provider answered with something we cannot use
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    /// Failed to parse tool arguments
    #[error("Failed to parse tool arguments for {tool_name}: {source}")]
    ToolArgumentParse {
        tool_name: String,
        source: serde_json::Error,
    },
}

impl LlmError {
    pub fn authentication<S: Into<String>>(message: S) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn rate_limit<S: Into<String>>(message: S, retry_after: Option<u64>) -> Self {
        Self::RateLimit {
            message: message.into(),
            retry_after,
        }
    }

    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn api_error(status: u16, message: String) -> Self {
        Self::Api { status, message }
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Classify a transport error, separating timeouts from other failures
    pub fn from_transport(source: reqwest::Error, timeout_secs: u64) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                seconds: timeout_secs,
            }
        } else {
            Self::Network { source }
        }
    }
}
