//! In-memory data sources for tests and demo wiring.

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;

use meridian_core::{Date, HoldingRecord, PriceSeries, ReturnRecord};

use crate::error::DataError;
use crate::file::filter_series;
use crate::sources::{FundDataSource, PriceSource};

/// Per-strategy tables held in memory.
#[derive(Debug, Clone, Default)]
struct StrategyTables {
    performance: Vec<ReturnRecord>,
    holdings: Vec<HoldingRecord>,
}

/// In-memory fund data source.
///
/// Strategies are registered up front; lookups for anything else return
/// `DataError::NotFound`.
#[derive(Default)]
pub struct InMemoryFundSource {
    tables: DashMap<String, StrategyTables>,
}

impl InMemoryFundSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a strategy's performance and holdings rows.
    pub fn insert(
        &self,
        strategy: impl Into<String>,
        performance: Vec<ReturnRecord>,
        holdings: Vec<HoldingRecord>,
    ) {
        self.tables.insert(
            strategy.into(),
            StrategyTables {
                performance,
                holdings,
            },
        );
    }
}

#[async_trait]
impl FundDataSource for InMemoryFundSource {
    async fn performance_rows(&self, strategy: &str) -> Result<Vec<ReturnRecord>, DataError> {
        self.tables
            .get(strategy)
            .map(|t| t.performance.clone())
            .ok_or_else(|| DataError::NotFound(strategy.to_string()))
    }

    async fn holdings_rows(&self, strategy: &str) -> Result<Vec<HoldingRecord>, DataError> {
        self.tables
            .get(strategy)
            .map(|t| t.holdings.clone())
            .ok_or_else(|| DataError::NotFound(strategy.to_string()))
    }
}

/// Static in-memory price source.
///
/// Serves pre-loaded series windowed to the requested start date;
/// symbols not loaded are omitted.
#[derive(Default)]
pub struct StaticPriceSource {
    series: HashMap<String, PriceSeries>,
}

impl StaticPriceSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a symbol's price series.
    pub fn insert(&mut self, symbol: impl Into<String>, series: PriceSeries) {
        self.series.insert(symbol.into(), series);
    }
}

#[async_trait]
impl PriceSource for StaticPriceSource {
    async fn adjusted_closes(
        &self,
        symbols: &[String],
        start: Date,
    ) -> Result<HashMap<String, PriceSeries>, DataError> {
        Ok(filter_series(&self.series, symbols, start))
    }
}

/// Price source with no data: every symbol is omitted.
///
/// Useful for wiring the server without a market-data provider; component
/// returns degrade to zero with a partial status.
pub struct EmptyPriceSource;

#[async_trait]
impl PriceSource for EmptyPriceSource {
    async fn adjusted_closes(
        &self,
        _symbols: &[String],
        _start: Date,
    ) -> Result<HashMap<String, PriceSeries>, DataError> {
        Ok(HashMap::new())
    }
}
