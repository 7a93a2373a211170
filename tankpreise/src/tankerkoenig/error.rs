//! Tankerkönig client error types.

/// Errors that can occur when talking to the Tankerkönig API.
#[derive(Debug, thiserror::Error)]
pub enum TankerkoenigError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API key rejected
    #[error("unauthorized: check TANKERKOENIG_API_KEY")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// API answered 2xx but flagged the request as failed (`ok: false`)
    #[error("request rejected: {message}")]
    Rejected { message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },
}
