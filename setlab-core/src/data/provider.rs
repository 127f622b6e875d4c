//! Data provider trait and structured error types.
//!
//! The MarketDataProvider trait abstracts over the market-data source so the
//! collection loop can be driven by a mock in tests.

use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;

/// Datetime rendering the provider expects in query parameters.
const QUERY_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Columnar candlestick payload, exactly as the provider returns it.
///
/// Parallel arrays keyed by field name. The provider does not guarantee equal
/// lengths across fields; alignment happens in [`crate::data::normalize`].
/// Every field defaults so an empty or partial payload deserializes to empty
/// columns rather than an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandleResponse {
    #[serde(default)]
    pub time: Vec<i64>,
    #[serde(default)]
    pub open: Vec<f64>,
    #[serde(default)]
    pub high: Vec<f64>,
    #[serde(default)]
    pub low: Vec<f64>,
    #[serde(default)]
    pub close: Vec<f64>,
    #[serde(default)]
    pub volume: Vec<f64>,
}

impl CandleResponse {
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
            && self.open.is_empty()
            && self.high.is_empty()
            && self.low.is_empty()
            && self.close.is_empty()
            && self.volume.is_empty()
    }
}

/// Fetch parameters for one candlestick request.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleQuery {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub interval: String,
    pub normalized: bool,
}

impl CandleQuery {
    pub fn start_param(&self) -> String {
        self.start.format(QUERY_DATETIME_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(QUERY_DATETIME_FORMAT).to_string()
    }
}

/// Structured error types for data operations.
///
/// Any of these is recoverable at the pipeline level: the failing symbol is
/// logged and skipped, the run continues.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for market-data providers.
///
/// Implementations handle the specifics of one source; the pipeline only
/// sees this contract.
pub trait MarketDataProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch candlestick columns for a symbol over the query's date range.
    ///
    /// An empty response is a valid result (symbol had no data in range);
    /// errors are reserved for failures.
    fn candlesticks(&self, symbol: &str, query: &CandleQuery)
        -> Result<CandleResponse, DataError>;
}

/// Progress callback for multi-symbol collection.
pub trait FetchProgress {
    /// Called when a symbol has been fetched and normalized.
    fn on_fetched(&self, symbol: &str);

    /// Called when a symbol fails; the pipeline continues with the next one.
    fn on_error(&self, symbol: &str, err: &DataError);
}

/// Progress reporter that prints one line per symbol.
pub struct StdoutProgress;

impl FetchProgress for StdoutProgress {
    fn on_fetched(&self, symbol: &str) {
        println!("{symbol} is finished");
    }

    fn on_error(&self, symbol: &str, err: &DataError) {
        eprintln!("An error occurred for symbol {symbol}: {err}");
    }
}
