//! Data source traits.
//!
//! These traits define the seams to the two upstream collaborators:
//! - [`FundDataSource`]: the spreadsheet-like store of performance and
//!   holdings tables, keyed by strategy name
//! - [`PriceSource`]: the market-data provider for adjusted closes
//!
//! Both are snapshot (request/response) interfaces; the service has no
//! streaming surface.

use std::collections::HashMap;

use async_trait::async_trait;

use meridian_core::{Date, HoldingRecord, PriceSeries, ReturnRecord};

use crate::error::DataError;

/// Per-strategy performance and holdings tables.
#[async_trait]
pub trait FundDataSource: Send + Sync {
    /// Raw performance rows for a strategy (date, cumulative fund return,
    /// cumulative benchmark return), in source order.
    ///
    /// Returns `DataError::NotFound` for an unknown strategy.
    async fn performance_rows(&self, strategy: &str) -> Result<Vec<ReturnRecord>, DataError>;

    /// Raw holdings rows for a strategy (full history, all dates).
    ///
    /// Returns `DataError::NotFound` for an unknown strategy.
    async fn holdings_rows(&self, strategy: &str) -> Result<Vec<HoldingRecord>, DataError>;
}

/// Market-data provider for adjusted-close price series.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Adjusted-close series for each symbol from `start` to the present.
    ///
    /// Unknown or delisted symbols are omitted from the result rather
    /// than failing the request; an `Err` means the provider itself was
    /// unreachable.
    async fn adjusted_closes(
        &self,
        symbols: &[String],
        start: Date,
    ) -> Result<HashMap<String, PriceSeries>, DataError>;
}
