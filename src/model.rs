// Core structs: Sample, Query, MarketChart and the error types shared across modules
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::Deserialize;
use thiserror::Error;

/// One value attributed to one calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub day: NaiveDate,
    pub value: f64,
}

/// Samples ordered by day, at most one per day.
pub type Series = Vec<Sample>;

/// A raw `[timestamp_ms, value]` pair as served by the market-chart endpoint.
pub type RawPoint = (f64, f64);

/// Time window of a query. The end bound sits one hour past the start of the
/// last requested day so that day's samples are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start.and_time(NaiveTime::MIN).and_utc(),
            end: end.and_time(NaiveTime::MIN).and_utc() + TimeDelta::hours(1),
        }
    }

    pub fn start_day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn end_day(&self) -> NaiveDate {
        self.end.date_naive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub coin: String,
    pub currency: String,
    pub range: DateRange,
}

/// Body of a `market_chart/range` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketChart {
    #[serde(default)]
    pub prices: Vec<RawPoint>,
    #[serde(default)]
    pub total_volumes: Vec<RawPoint>,
    #[serde(default)]
    pub market_caps: Vec<RawPoint>,
}

/// A [`MarketChart`] reduced to one sample per day for every metric.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedChart {
    pub prices: Series,
    pub total_volumes: Series,
    pub market_caps: Series,
}

/// Best buy/sell pair found in a price series. `gain` is always positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitPair {
    pub buy_day: NaiveDate,
    pub sell_day: NaiveDate,
    pub gain: f64,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("market data service answered with status {0}")]
    Status(u16),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("'{token}' is not a valid date (expected YYYY-MM-DD): {source}")]
    InvalidDate {
        token: String,
        #[source]
        source: chrono::ParseError,
    },
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
