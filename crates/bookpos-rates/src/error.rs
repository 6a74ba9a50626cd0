//! # Rate Service Error Types
//!
//! Error types for exchange-rate fetching.
//!
//! ## Failure Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Rate Refresh Failure Modes                          │
//! │                                                                         │
//! │  ┌───────────────────┐  ┌───────────────────┐  ┌────────────────────┐  │
//! │  │     Transport     │  │     Provider      │  │      Payload       │  │
//! │  │                   │  │                   │  │                    │  │
//! │  │  Http             │  │  Api              │  │  EmptyPayload      │  │
//! │  │  (DNS, timeout,   │  │  (result field    │  │  (success with no  │  │
//! │  │   non-2xx, body)  │  │   not "success")  │  │   rates at all)    │  │
//! │  └───────────────────┘  └───────────────────┘  └────────────────────┘  │
//! │                                                                         │
//! │  Every failure is reported and leaves the rates currently in use        │
//! │  untouched.                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for rate operations.
pub type RateResult<T> = Result<T, RateError>;

/// Everything that can go wrong between asking for rates and having them.
#[derive(Debug, Error)]
pub enum RateError {
    /// The HTTP request itself failed: connect, timeout, non-2xx status,
    /// or an unparseable response body.
    #[error("exchange rate request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered but flagged the response as unsuccessful.
    #[error("exchange rate provider reported {result:?}; try again later")]
    Api { result: String },

    /// A "successful" response that carries no rates at all. Installing it
    /// would wipe a working table, so it is treated as a failure.
    #[error("exchange rate provider returned an empty rate set")]
    EmptyPayload,
}

impl RateError {
    /// True when the failure is transient and a later manual refresh is
    /// likely to succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            RateError::Http(err) => {
                err.is_timeout() || err.is_connect() || err.is_request()
            }
            RateError::Api { .. } => true,
            RateError::EmptyPayload => true,
        }
    }
}
