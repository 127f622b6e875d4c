//! Run configuration — symbols, date range, interval, and output paths.
//!
//! The defaults are the standing collection run: the fixed 32-symbol SET
//! universe, the 2021-08-01 to 2024-08-09 range, daily interval, and the
//! three CSV filenames in the working directory. Everything is an explicit
//! value so tests can substitute their own universe and paths.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::provider::CandleQuery;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Full configuration for one collection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectConfig {
    /// Symbols to fetch, in fetch order.
    pub symbols: Vec<String>,

    /// Range start (inclusive), sent to the provider as a local datetime.
    pub start: NaiveDateTime,

    /// Range end (inclusive).
    pub end: NaiveDateTime,

    /// Candlestick interval, e.g. "1d".
    pub interval: String,

    /// Request provider-adjusted pricing.
    pub normalized: bool,

    /// Output CSV locations.
    #[serde(default)]
    pub outputs: OutputPaths,
}

/// Where the three CSV artifacts land. Existing files are overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputPaths {
    pub combined: PathBuf,
    pub train: PathBuf,
    pub test: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            combined: PathBuf::from("combined_stocks_data.csv"),
            train: PathBuf::from("stocks_data_train.csv"),
            test: PathBuf::from("stocks_data_test.csv"),
        }
    }
}

impl OutputPaths {
    /// The default filenames, rooted in `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        let base = Self::default();
        Self {
            combined: dir.join(base.combined),
            train: dir.join(base.train),
            test: dir.join(base.test),
        }
    }
}

/// The fixed SET universe the collector was built for.
pub fn default_symbols() -> Vec<String> {
    [
        "EA", "BBL", "KTB", "SCB", "KBANK", "BDMS", "PTT", "PTTEP", "ADVANC", "CPALL", "GULF",
        "DELTA", "TTB", "IVL", "INTUCH", "VGI", "GPSC", "JMT", "AOT", "BTS", "TOP", "CPF",
        "BGRIM", "TISCO", "MTC", "BANPU", "KTC", "BCP", "KKP", "HMPRO", "TIDLOR", "AJA",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            symbols: default_symbols(),
            start: NaiveDate::from_ymd_opt(2021, 8, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 8, 9)
                .unwrap()
                .and_hms_opt(23, 59, 0)
                .unwrap(),
            interval: "1d".into(),
            normalized: true,
            outputs: OutputPaths::default(),
        }
    }
}

impl CollectConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The per-symbol fetch parameters this configuration describes.
    pub fn query(&self) -> CandleQuery {
        CandleQuery {
            start: self.start,
            end: self.end,
            interval: self.interval.clone(),
            normalized: self.normalized,
        }
    }
}
