//! Time-series abstractions for published central bank indicators

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use std::fmt::Display;
use thiserror::Error;

/// Numeric identifier of a published SGS time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesId(pub u32);

impl SeriesId {
    /// SELIC accumulated in the year, annualized (base 252).
    pub const SELIC_ACCUMULATED: SeriesId = SeriesId(1178);
    /// TR (Taxa Referencial) accumulated in the year.
    pub const TR_ACCUMULATED: SeriesId = SeriesId(226);
}

impl Display for SeriesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single published observation of a series.
///
/// Values are percentages on the 0..100 scale, exactly as the SGS service
/// publishes them.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server returned HTTP {0}")]
    Upstream(StatusCode),

    #[error("malformed series response: {0}")]
    Parse(String),
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Returns the most recent observation of `series` within `year`.
    async fn fetch_latest(&self, series: SeriesId, year: i32) -> Result<Observation, FetchError>;
}
