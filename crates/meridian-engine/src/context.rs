//! Per-strategy context: loaded data plus derived analytics.

use std::time::Duration;

use tracing::warn;

use meridian_analytics::PerformanceMetrics;
use meridian_core::{Date, ReturnSeries};
use meridian_data::{FundDataSource, PriceSource};
use meridian_portfolio::{
    component_returns, portfolio_mtd_return, portfolio_ytd_return, AllocationMap,
    AttributionStatus, ComponentReturns, HoldingsSnapshot,
};

use crate::error::EngineResult;
use crate::memo::AttributionMemo;

/// One strategy's loaded data and derived state.
///
/// Immutable after construction apart from the attribution memo. Metrics
/// and allocations are cheap and recomputed or pre-derived per context;
/// component returns go through the memo because they depend on an
/// external price fetch.
pub struct StrategyContext {
    name: String,
    series: ReturnSeries,
    snapshot: HoldingsSnapshot,
    asset_allocation: AllocationMap,
    sector_allocation: AllocationMap,
    attribution: AttributionMemo,
}

impl StrategyContext {
    /// Load a strategy through the fund data source.
    ///
    /// Returns `Ok(None)` when the source does not know the strategy;
    /// other source failures propagate. A strategy with performance but
    /// no holdings table gets an empty snapshot.
    pub async fn load(
        name: &str,
        source: &dyn FundDataSource,
        attribution_stale_after: Option<Duration>,
    ) -> EngineResult<Option<Self>> {
        let performance = match source.performance_rows(name).await {
            Ok(rows) => rows,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let holdings = match source.holdings_rows(name).await {
            Ok(rows) => rows,
            Err(e) if e.is_not_found() => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        let series = ReturnSeries::from_records(performance);
        let snapshot = HoldingsSnapshot::from_history(&holdings);
        let asset_allocation = snapshot.allocation_by_symbol();
        let sector_allocation = snapshot.allocation_by_sector();

        Ok(Some(Self {
            name: name.to_string(),
            series,
            snapshot,
            asset_allocation,
            sector_allocation,
            attribution: AttributionMemo::new(attribution_stale_after),
        }))
    }

    /// Strategy name as known to the data source.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The normalized performance series.
    #[must_use]
    pub fn series(&self) -> &ReturnSeries {
        &self.series
    }

    /// The current-holdings snapshot.
    #[must_use]
    pub fn snapshot(&self) -> &HoldingsSnapshot {
        &self.snapshot
    }

    /// Weights by symbol over the current snapshot.
    #[must_use]
    pub fn asset_allocation(&self) -> &AllocationMap {
        &self.asset_allocation
    }

    /// Weights by sector over the current snapshot.
    #[must_use]
    pub fn sector_allocation(&self) -> &AllocationMap {
        &self.sector_allocation
    }

    /// Scalar performance metrics, recomputed from the cached series.
    #[must_use]
    pub fn metrics(&self) -> PerformanceMetrics {
        PerformanceMetrics::calculate(&self.series)
    }

    /// Per-holding cumulative returns since the purchase anchor.
    ///
    /// Memoized after the first successful fetch. A total provider
    /// failure is absorbed: the result carries the anchor label, an empty
    /// component list, and a `FetchFailed` status, and is *not* memoized,
    /// so a later call retries. An empty symbol allocation short-circuits
    /// without touching the provider.
    pub async fn component_returns(&self, prices: &dyn PriceSource) -> ComponentReturns {
        if self.asset_allocation.is_empty() {
            return ComponentReturns::empty("", AttributionStatus::NoHoldings);
        }

        if let Some(cached) = self.attribution.get() {
            return cached;
        }

        let label = self.snapshot.attribution_period_label().unwrap_or_default();
        let Some(anchor) = self.snapshot.anchor_date() else {
            return ComponentReturns::empty(label, AttributionStatus::NoHoldings);
        };

        let mut symbols: Vec<String> = self.asset_allocation.keys().cloned().collect();
        symbols.sort();

        match prices.adjusted_closes(&symbols, anchor).await {
            Ok(fetched) => {
                let (components, status) = component_returns(&self.asset_allocation, &fetched);
                let result = ComponentReturns {
                    as_of_label: label,
                    status,
                    components,
                };
                self.attribution.store(result.clone());
                result
            }
            Err(e) => {
                warn!("Component return fetch failed for '{}': {}", self.name, e);
                ComponentReturns::empty(label, AttributionStatus::FetchFailed {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Portfolio month-to-date return: allocation weights dotted with the
    /// memoized component returns.
    pub async fn portfolio_mtd_return(&self, prices: &dyn PriceSource) -> f64 {
        let attribution = self.component_returns(prices).await;
        portfolio_mtd_return(&self.asset_allocation, &attribution.components)
    }

    /// Portfolio year-to-date return: the fund return since the last
    /// calendar year-end compounded with the month-to-date return.
    /// `today` is injected so callers and tests control the window.
    pub async fn portfolio_ytd_return(
        &self,
        prices: &dyn PriceSource,
        today: Date,
    ) -> Option<f64> {
        let mtd = self.portfolio_mtd_return(prices).await;
        portfolio_ytd_return(&self.series, mtd, today)
    }

    /// Drop the memoized attribution so the next access refetches.
    pub fn invalidate_attribution(&self) {
        self.attribution.invalidate();
    }
}
