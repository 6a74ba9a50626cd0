//! # Rate Sources
//!
//! Where exchange rates come from. [`RateSource`] is the seam: the service
//! refreshes from any source, the production source is an HTTP client for
//! open.er-api.com, and tests substitute canned sources.
//!
//! ## Wire Shape
//! The provider returns AUD-based rates, which is exactly the orientation
//! the pricing engine wants (units of foreign currency per 1 AUD):
//! ```text
//! {
//!   "result": "success",
//!   "rates": { "AUD": 1.0, "JPY": 97.2, "CNY": 4.7, ... }
//! }
//! ```
//! Only `result` and `rates` are read; everything else the provider sends
//! is ignored.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{RateError, RateResult};

/// Public endpoint serving AUD-based rates, no API key required.
pub const DEFAULT_RATE_URL: &str = "https://open.er-api.com/v6/latest/AUD";

/// How long a fetch may take before it is abandoned.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// Wire Types
// =============================================================================

/// One provider response, as received.
#[derive(Debug, Clone, Deserialize)]
pub struct RateSnapshot {
    /// Provider verdict; anything other than `"success"` is a failure.
    pub result: String,

    /// Units of each currency per 1 AUD, keyed by ISO code.
    #[serde(default)]
    pub rates: HashMap<String, f64>,
}

impl RateSnapshot {
    /// Rejects responses that must not replace a working rate table:
    /// non-success verdicts and empty rate sets.
    pub fn validate(self) -> RateResult<Self> {
        if self.result != "success" {
            return Err(RateError::Api {
                result: self.result,
            });
        }
        if self.rates.is_empty() {
            return Err(RateError::EmptyPayload);
        }
        Ok(self)
    }
}

// =============================================================================
// Source Trait
// =============================================================================

/// Anything that can produce a fresh [`RateSnapshot`].
pub trait RateSource: Send + Sync {
    /// Fetches the latest snapshot. Transport and decode failures come
    /// back as errors; verdict checking is the caller's job via
    /// [`RateSnapshot::validate`].
    fn fetch(&self) -> impl Future<Output = RateResult<RateSnapshot>> + Send;
}

// =============================================================================
// HTTP Source
// =============================================================================

/// Production source backed by the public exchange-rate API.
#[derive(Debug, Clone)]
pub struct ErApiSource {
    client: reqwest::Client,
    url: String,
}

impl ErApiSource {
    /// Source pointed at [`DEFAULT_RATE_URL`].
    pub fn new() -> Self {
        Self::with_url(DEFAULT_RATE_URL)
    }

    /// Source pointed at a custom endpoint (test servers, mirrors).
    pub fn with_url(url: impl Into<String>) -> Self {
        ErApiSource {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl Default for ErApiSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RateSource for ErApiSource {
    async fn fetch(&self) -> RateResult<RateSnapshot> {
        debug!(url = %self.url, "fetching exchange rates");

        let snapshot: RateSnapshot = self
            .client
            .get(&self.url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(
            result = %snapshot.result,
            rates = snapshot.rates.len(),
            "exchange rate response received"
        );
        Ok(snapshot)
    }
}
