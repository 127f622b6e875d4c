//! Bar — one normalized row of the output table.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single daily candlestick row, tagged with its symbol.
///
/// `weekday` follows the Monday=0 convention and is `None` for Saturday and
/// Sunday rows. Field order is the CSV column order; `symbol` and `weekday`
/// render as the `tic` and `day` columns, and a `None` weekday renders as an
/// empty cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    #[serde(with = "datetime_format")]
    pub date: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    #[serde(rename = "tic")]
    pub symbol: String,
    #[serde(rename = "day")]
    pub weekday: Option<u32>,
}

impl Bar {
    /// True when the row falls on a trading weekday.
    pub fn is_business_day(&self) -> bool {
        self.weekday.is_some()
    }
}

/// Datetime (de)serialization in the `YYYY-MM-DD HH:MM:SS` rendering the
/// output files use.
pub mod datetime_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
