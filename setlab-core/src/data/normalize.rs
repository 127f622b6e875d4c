//! Columnar-to-row normalization.
//!
//! The provider returns parallel arrays of possibly unequal length. The
//! alignment policy truncates every column to the shortest length, dropping
//! trailing excess only; leading misalignment is not detectable at this
//! layer.

use chrono::{Datelike, Local, LocalResult, NaiveDateTime, TimeZone};

use super::provider::{CandleResponse, DataError};
use crate::domain::Bar;

/// The six candlestick columns, cut to a common length.
#[derive(Debug, Clone)]
pub struct AlignedColumns {
    pub time: Vec<i64>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
}

impl AlignedColumns {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// The alignment policy: slice every column to `[0, min(lengths))`.
pub fn truncate_to_min(mut response: CandleResponse) -> AlignedColumns {
    let n = response
        .time
        .len()
        .min(response.open.len())
        .min(response.high.len())
        .min(response.low.len())
        .min(response.close.len())
        .min(response.volume.len());

    response.time.truncate(n);
    response.open.truncate(n);
    response.high.truncate(n);
    response.low.truncate(n);
    response.close.truncate(n);
    response.volume.truncate(n);

    AlignedColumns {
        time: response.time,
        open: response.open,
        high: response.high,
        low: response.low,
        close: response.close,
        volume: response.volume,
    }
}

/// Weekday under the Monday=0 convention; Saturday and Sunday map to None.
pub fn weekday_marker(date: NaiveDateTime) -> Option<u32> {
    let day = date.weekday().num_days_from_monday();
    (day < 5).then_some(day)
}

/// Epoch seconds to a local calendar datetime.
fn local_datetime(ts: i64) -> Result<NaiveDateTime, DataError> {
    match Local.timestamp_opt(ts, 0) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt.naive_local()),
        LocalResult::None => Err(DataError::ResponseFormatChanged(format!(
            "invalid timestamp: {ts}"
        ))),
    }
}

/// Convert a columnar response into symbol-tagged rows.
///
/// Numeric ranges and time ordering are taken as-is from the provider.
pub fn normalize(symbol: &str, response: CandleResponse) -> Result<Vec<Bar>, DataError> {
    let cols = truncate_to_min(response);
    let mut bars = Vec::with_capacity(cols.len());

    for i in 0..cols.len() {
        let date = local_datetime(cols.time[i])?;
        bars.push(Bar {
            date,
            open: cols.open[i],
            high: cols.high[i],
            low: cols.low[i],
            close: cols.close[i],
            volume: cols.volume[i],
            symbol: symbol.to_string(),
            weekday: weekday_marker(date),
        });
    }

    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Local-noon epoch for a calendar day. Noon keeps the calendar date
    /// stable in every host timezone.
    fn ts(y: i32, m: u32, d: u32) -> i64 {
        Local
            .with_ymd_and_hms(y, m, d, 12, 0, 0)
            .earliest()
            .unwrap()
            .timestamp()
    }

    fn response(times: Vec<i64>) -> CandleResponse {
        let n = times.len();
        CandleResponse {
            time: times,
            open: vec![10.0; n],
            high: vec![11.0; n],
            low: vec![9.0; n],
            close: vec![10.5; n],
            volume: vec![1000.0; n],
        }
    }

    #[test]
    fn truncates_to_shortest_column() {
        let response = CandleResponse {
            time: vec![1, 2, 3, 4],
            open: vec![1.0, 2.0, 3.0],
            high: vec![1.0, 2.0, 3.0, 4.0, 5.0],
            low: vec![1.0, 2.0, 3.0],
            close: vec![1.0, 2.0, 3.0, 4.0],
            volume: vec![1.0, 2.0, 3.0, 4.0],
        };
        let cols = truncate_to_min(response);
        assert_eq!(cols.len(), 3);
        assert_eq!(cols.time, vec![1, 2, 3]);
        assert_eq!(cols.high, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn truncation_keeps_the_prefix() {
        let response = CandleResponse {
            time: vec![10, 20, 30],
            open: vec![1.0, 2.0],
            high: vec![1.0, 2.0],
            low: vec![1.0, 2.0],
            close: vec![1.0, 2.0],
            volume: vec![1.0, 2.0],
        };
        let cols = truncate_to_min(response);
        assert_eq!(cols.time, vec![10, 20]);
    }

    #[test]
    fn empty_response_normalizes_to_no_rows() {
        let bars = normalize("EA", CandleResponse::default()).unwrap();
        assert!(bars.is_empty());
    }

    #[test]
    fn weekday_marker_follows_monday_zero_convention() {
        // 2024-08-05 is a Monday, 2024-08-09 a Friday.
        for (day, expected) in [(5, Some(0)), (6, Some(1)), (7, Some(2)), (8, Some(3)), (9, Some(4))] {
            let date = local_datetime(ts(2024, 8, day)).unwrap();
            assert_eq!(weekday_marker(date), expected);
        }
    }

    #[test]
    fn weekend_rows_get_null_weekday() {
        // 2024-08-03 Saturday, 2024-08-04 Sunday.
        for day in [3, 4] {
            let date = local_datetime(ts(2024, 8, day)).unwrap();
            assert_eq!(weekday_marker(date), None);
        }
    }

    #[test]
    fn rows_are_tagged_with_the_symbol() {
        let bars = normalize("KBANK", response(vec![ts(2024, 8, 5), ts(2024, 8, 6)])).unwrap();
        assert_eq!(bars.len(), 2);
        assert!(bars.iter().all(|b| b.symbol == "KBANK"));
    }

    #[test]
    fn row_values_come_from_matching_indices() {
        let response = CandleResponse {
            time: vec![ts(2024, 8, 5), ts(2024, 8, 6)],
            open: vec![1.0, 2.0],
            high: vec![1.5, 2.5],
            low: vec![0.5, 1.5],
            close: vec![1.2, 2.2],
            volume: vec![100.0, 200.0],
        };
        let bars = normalize("PTT", response).unwrap();
        assert_eq!(bars[1].open, 2.0);
        assert_eq!(bars[1].high, 2.5);
        assert_eq!(bars[1].low, 1.5);
        assert_eq!(bars[1].close, 2.2);
        assert_eq!(bars[1].volume, 200.0);
    }

    #[test]
    fn unrepresentable_timestamp_is_an_error() {
        let err = normalize("EA", response(vec![i64::MAX])).unwrap_err();
        assert!(matches!(err, DataError::ResponseFormatChanged(_)));
    }
}
