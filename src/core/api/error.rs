//! Chat API error types.

/// Errors from a chat request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Could not build the HTTP client (TLS backend, invalid settings).
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request timed out")]
    Timeout,
    #[error("Could not reach the analysis API at {url}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("Invalid response body: {0}")]
    InvalidBody(String),
    /// The request was cancelled by the user.
    #[error("Request cancelled")]
    Cancelled,
    #[error("{0}")]
    Transport(#[source] reqwest::Error),
}

/// Map a reqwest error into ApiError, separating timeouts and connection failures.
pub fn map_transport_error(e: reqwest::Error, url: &str) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else if e.is_connect() {
        ApiError::Connect {
            url: url.to_string(),
            source: e,
        }
    } else if e.is_decode() {
        ApiError::InvalidBody(e.to_string())
    } else {
        ApiError::Transport(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_matches_web_client() {
        assert_eq!(ApiError::Status(502).to_string(), "HTTP error! status: 502");
    }

    #[test]
    fn cancelled_message() {
        assert_eq!(ApiError::Cancelled.to_string(), "Request cancelled");
    }

    #[test]
    fn invalid_body_message() {
        let e = ApiError::InvalidBody("expected value at line 1".to_string());
        assert!(e.to_string().starts_with("Invalid response body"));
    }
}
