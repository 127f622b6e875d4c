//! Aggregation and CSV artifact output.
//!
//! Concatenates per-symbol tables, stable-sorts by (date, symbol), and
//! writes three artifacts: the combined table and a positional 50/50
//! train/test split of it. The split is by row position only; it does not
//! respect date or symbol boundaries.

use std::path::Path;

use thiserror::Error;

use crate::config::OutputPaths;
use crate::domain::Bar;

const CSV_HEADER: [&str; 8] = [
    "date", "open", "high", "low", "close", "volume", "tic", "day",
];

/// Write failures are fatal to the run; there is no partial-output cleanup.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Concatenate tables in their given order, then stable-sort by
/// (date ascending, symbol ascending). Ties beyond that retain prior order.
pub fn sort_combined(tables: Vec<Vec<Bar>>) -> Vec<Bar> {
    let mut rows: Vec<Bar> = tables.into_iter().flatten().collect();
    rows.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.symbol.cmp(&b.symbol)));
    rows
}

/// Positional partition at `floor(total / 2)`: first half train, rest test.
pub fn split_rows(rows: &[Bar]) -> (&[Bar], &[Bar]) {
    rows.split_at(rows.len() / 2)
}

/// Write rows to a CSV file. The header row is always written, even for an
/// empty table.
pub fn write_csv(path: &Path, rows: &[Bar]) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the combined table and its train/test split.
pub fn write_outputs(rows: &[Bar], paths: &OutputPaths) -> Result<(), ExportError> {
    write_csv(&paths.combined, rows)?;
    let (train, test) = split_rows(rows);
    write_csv(&paths.train, train)?;
    write_csv(&paths.test, test)?;
    Ok(())
}
