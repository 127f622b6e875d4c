//! Market data access — provider seam, Settrade client, normalization.

pub mod normalize;
pub mod provider;
pub mod settrade;

pub use normalize::{normalize, truncate_to_min, AlignedColumns};
pub use provider::{
    CandleQuery, CandleResponse, DataError, FetchProgress, MarketDataProvider, StdoutProgress,
};
pub use settrade::{Credentials, SettradeProvider};
