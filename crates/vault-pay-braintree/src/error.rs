//! Processor error types.

/// Errors that prevent the processor from giving a definite answer about a sale.
///
/// A declined sale is not an error; see [`crate::SaleOutcome::Declined`].
#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway returned an unexpected error status.
    #[error("Braintree API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// The gateway answered with a body we could not interpret.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
