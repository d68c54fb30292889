use std::time::Duration;
use thiserror::Error;

/// Error types for form relay operations.
///
/// Every failure of an outbound POST is reported through this enum instead of
/// being logged and dropped, so callers can tell a failed request apart from a
/// legitimately empty response body.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use form_relay::{submit_form_post, ParameterSet, RelayError};
///
/// #[tokio::main]
/// async fn main() {
///     let params = ParameterSet::from_pairs([("user_id", "42")]);
///
///     match submit_form_post("https://tool.example.com/launch", &params).await {
///         Ok(body) => println!("Tool replied: {body}"),
///         Err(RelayError::Status { status, .. }) => eprintln!("Tool rejected launch: {status}"),
///         Err(RelayError::Timeout { after }) => eprintln!("No reply within {after:?}"),
///         Err(e) => eprintln!("Launch failed: {e}"),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum RelayError {
    /// The destination address could not be used.
    ///
    /// Raised when the address does not parse as a URL or its scheme is
    /// something other than `http` or `https`.
    #[error("Invalid address '{address}': {reason}")]
    InvalidUrl {
        /// The address as given by the caller
        address: String,
        /// Why it was rejected
        reason: String,
    },

    /// HTTP/network related errors.
    ///
    /// This includes connection failures, DNS errors, and other
    /// low-level networking issues.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The remote endpoint answered with a non-2xx status.
    #[error("Unexpected HTTP status {status}")]
    Status {
        /// Numeric status code of the response
        status: u16,
        /// Response body, kept for diagnostics
        body: String,
    },

    /// No complete response arrived within the configured timeout.
    #[error("Request timed out after {after:?}")]
    Timeout {
        /// The timeout that elapsed
        after: Duration,
    },

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// A key in a multi-valued parameter map had no values at all.
    #[error("Parameter '{key}' has no values")]
    EmptyValues {
        /// The offending key
        key: String,
    },

    /// File system or runtime I/O errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
