//! Sink error types.

/// Errors raised while delivering entries to a backend.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend rejected the write
    #[error("write rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

impl SinkError {
    /// Whether the same write could succeed later: transport failures and
    /// server errors. A 4xx means the write itself is bad.
    pub fn is_retryable(&self) -> bool {
        match self {
            SinkError::Http(_) => true,
            SinkError::Rejected { status, .. } => *status >= 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(status: u16) -> SinkError {
        SinkError::Rejected {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn client_errors_are_final() {
        assert!(!rejected(400).is_retryable());
        assert!(!rejected(401).is_retryable());
        assert!(!rejected(404).is_retryable());
    }

    #[test]
    fn server_errors_are_retried() {
        assert!(rejected(500).is_retryable());
        assert!(rejected(503).is_retryable());
    }
}
