//! Error types shared between the feed and the board.
//!
//! The `BoardError` enum unifies the failure cases for HTTP transport,
//! symbol parsing and serialization, allowing crates to propagate a single
//! error type. The public quote API never surfaces it: fetchers log the error
//! and hand back an absent quote instead.
use thiserror::Error;

/// Unified error type shared by the feed and the board.
#[derive(Error, Debug)]
pub enum BoardError {
    /// A vendor symbol that does not look like `sz000543`.
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// HTTP transport failure (connect, TLS, body decode).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The vendor answered with a non-success status code.
    #[error("Unexpected HTTP status {status} from {url}")]
    Status {
        /// Status code returned by the vendor.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Installing the Ctrl+C handler failed.
    #[error("Signal handler error: {0}")]
    Signal(String),
}
