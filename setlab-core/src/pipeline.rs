//! Collection orchestrator — the sequential per-symbol fetch loop.
//!
//! One symbol at a time, in list order. A failing symbol is reported and
//! skipped; it contributes zero rows and the loop continues. Deliberately no
//! parallel fetches: provider behavior under concurrent calls is unspecified.

use crate::data::normalize::normalize;
use crate::data::provider::{CandleQuery, DataError, FetchProgress, MarketDataProvider};
use crate::domain::Bar;

/// Fetch and normalize every symbol, collecting per-symbol tables.
pub fn collect_symbols(
    provider: &dyn MarketDataProvider,
    symbols: &[String],
    query: &CandleQuery,
    progress: &dyn FetchProgress,
) -> CollectSummary {
    let total = symbols.len();
    let mut tables = Vec::with_capacity(total);
    let mut errors: Vec<(String, DataError)> = Vec::new();

    for symbol in symbols {
        match fetch_one(provider, symbol, query) {
            Ok(table) => {
                progress.on_fetched(symbol);
                tables.push(table);
            }
            Err(e) => {
                progress.on_error(symbol, &e);
                errors.push((symbol.clone(), e));
            }
        }
    }

    CollectSummary {
        total,
        succeeded: tables.len(),
        failed: errors.len(),
        tables,
        errors,
    }
}

/// Fetch → normalize for a single symbol. An empty response is a success
/// with an empty table.
fn fetch_one(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    query: &CandleQuery,
) -> Result<Vec<Bar>, DataError> {
    let response = provider.candlesticks(symbol, query)?;
    normalize(symbol, response)
}

/// Outcome of a collection run.
///
/// `tables` retains symbol-list order with failed symbols omitted.
#[derive(Debug)]
pub struct CollectSummary {
    pub tables: Vec<Vec<Bar>>,
    pub errors: Vec<(String, DataError)>,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl CollectSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
