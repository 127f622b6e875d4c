//! SETLab Core — domain types, Settrade provider, normalization pipeline, CSV export.
//!
//! This crate contains everything except the CLI wiring:
//! - Domain types (bars)
//! - Provider trait and the Settrade Open API client
//! - Columnar-to-row normalization with the minimum-length alignment policy
//! - The sequential per-symbol collection loop
//! - Combined/train/test CSV artifact output

pub mod config;
pub mod data;
pub mod domain;
pub mod export;
pub mod pipeline;
