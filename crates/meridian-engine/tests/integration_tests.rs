//! Integration tests for strategy contexts and the registry:
//! lazy loading, context reuse, attribution memoization, and
//! degrade-on-failure semantics.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use approx::assert_relative_eq;
use async_trait::async_trait;

use meridian_core::{Date, HoldingRecord, PricePoint, PriceSeries, ReturnRecord};
use meridian_data::{DataError, InMemoryFundSource, PriceSource, StaticPriceSource};
use meridian_engine::StrategyRegistry;
use meridian_portfolio::AttributionStatus;

// =============================================================================
// TEST SOURCES
// =============================================================================

/// Price source that counts fetches and delegates to a static source.
struct CountingPriceSource {
    inner: StaticPriceSource,
    fetches: AtomicUsize,
}

impl CountingPriceSource {
    fn new(inner: StaticPriceSource) -> Self {
        Self {
            inner,
            fetches: AtomicUsize::new(0),
        }
    }

    fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceSource for CountingPriceSource {
    async fn adjusted_closes(
        &self,
        symbols: &[String],
        start: Date,
    ) -> Result<HashMap<String, PriceSeries>, DataError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.adjusted_closes(symbols, start).await
    }
}

/// Price source whose provider is always down.
struct FailingPriceSource {
    fetches: AtomicUsize,
}

impl FailingPriceSource {
    fn new() -> Self {
        Self {
            fetches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PriceSource for FailingPriceSource {
    async fn adjusted_closes(
        &self,
        _symbols: &[String],
        _start: Date,
    ) -> Result<HashMap<String, PriceSeries>, DataError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Err(DataError::SourceNotAvailable("provider down".to_string()))
    }
}

// =============================================================================
// FIXTURES
// =============================================================================

fn date(s: &str) -> Date {
    Date::parse(s).unwrap()
}

fn fund_source() -> Arc<InMemoryFundSource> {
    let source = InMemoryFundSource::new();
    source.insert(
        "All Weather",
        vec![
            ReturnRecord {
                date: date("2024-12-31"),
                fund: 1.20,
                benchmark: 1.10,
            },
            ReturnRecord {
                date: date("2025-01-31"),
                fund: 1.26,
                benchmark: 1.12,
            },
            ReturnRecord {
                date: date("2025-02-28"),
                fund: 1.32,
                benchmark: 1.14,
            },
        ],
        vec![
            HoldingRecord::new(date("2025-01-31"), "AAA", 0.6).with_sector("Technology"),
            HoldingRecord::new(date("2025-02-28"), "AAA", 0.6).with_sector("Technology"),
            HoldingRecord::new(date("2025-02-28"), "BBB", 0.4).with_sector("Healthcare"),
        ],
    );
    source.insert(
        "Cash Only",
        vec![ReturnRecord {
            date: date("2025-01-31"),
            fund: 1.01,
            benchmark: 1.00,
        }],
        vec![],
    );
    Arc::new(source)
}

fn prices() -> StaticPriceSource {
    let mut source = StaticPriceSource::new();
    source.insert(
        "AAA",
        PriceSeries::from_points(vec![
            PricePoint {
                date: date("2025-01-31"),
                close: 100.0,
            },
            PricePoint {
                date: date("2025-03-01"),
                close: 110.0,
            },
        ]),
    );
    source.insert(
        "BBB",
        PriceSeries::from_points(vec![
            PricePoint {
                date: date("2025-01-31"),
                close: 50.0,
            },
            PricePoint {
                date: date("2025-03-01"),
                close: 47.5,
            },
        ]),
    );
    source
}

// =============================================================================
// REGISTRY
// =============================================================================

#[tokio::test]
async fn test_registry_returns_same_context_on_repeat_access() {
    let registry = StrategyRegistry::new(fund_source());

    let first = registry.get_or_create("All Weather").await.unwrap().unwrap();
    let second = registry.get_or_create("All Weather").await.unwrap().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.loaded(), 1);
}

#[tokio::test]
async fn test_unknown_strategy_is_none_not_error() {
    let registry = StrategyRegistry::new(fund_source());
    assert!(registry.get_or_create("No Such Fund").await.unwrap().is_none());
    assert_eq!(registry.loaded(), 0);
}

#[tokio::test]
async fn test_context_carries_normalized_series_and_allocations() {
    let registry = StrategyRegistry::new(fund_source());
    let ctx = registry.get_or_create("All Weather").await.unwrap().unwrap();

    assert_eq!(ctx.series().len(), 3);
    assert_eq!(ctx.asset_allocation().len(), 2);
    assert_relative_eq!(ctx.asset_allocation()["AAA"], 0.6);
    assert_relative_eq!(ctx.sector_allocation()["Healthcare"], 0.4);

    // Snapshot is the 2025-02-28 rows; anchor is the first history date.
    assert_eq!(ctx.snapshot().as_of(), Some(date("2025-02-28")));
    assert_eq!(ctx.snapshot().anchor_date(), Some(date("2025-01-31")));

    let metrics = ctx.metrics();
    assert_relative_eq!(metrics.total_return.unwrap(), 0.32, epsilon = 1e-12);
}

// =============================================================================
// ATTRIBUTION MEMOIZATION
// =============================================================================

#[tokio::test]
async fn test_component_returns_fetch_once() {
    let registry = StrategyRegistry::new(fund_source());
    let ctx = registry.get_or_create("All Weather").await.unwrap().unwrap();
    let prices = CountingPriceSource::new(prices());

    let first = ctx.component_returns(&prices).await;
    let second = ctx.component_returns(&prices).await;

    assert_eq!(prices.fetch_count(), 1);
    assert_eq!(first, second);
    assert_eq!(first.status, AttributionStatus::Complete);
    assert_eq!(first.as_of_label, "Feb 2025");

    // Sorted descending: AAA +10%, BBB -5%.
    assert_eq!(first.components[0].symbol, "AAA");
    assert_relative_eq!(first.components[0].value, 0.10, epsilon = 1e-12);
    assert_relative_eq!(first.components[1].value, -0.05, epsilon = 1e-12);
}

#[tokio::test]
async fn test_invalidate_forces_refetch() {
    let registry = StrategyRegistry::new(fund_source());
    let ctx = registry.get_or_create("All Weather").await.unwrap().unwrap();
    let prices = CountingPriceSource::new(prices());

    ctx.component_returns(&prices).await;
    ctx.invalidate_attribution();
    ctx.component_returns(&prices).await;

    assert_eq!(prices.fetch_count(), 2);
}

#[tokio::test]
async fn test_failed_fetch_degrades_and_is_not_memoized() {
    let registry = StrategyRegistry::new(fund_source());
    let ctx = registry.get_or_create("All Weather").await.unwrap().unwrap();
    let prices = FailingPriceSource::new();

    let result = ctx.component_returns(&prices).await;

    // Anchor label intact, components empty, typed failure status.
    assert_eq!(result.as_of_label, "Feb 2025");
    assert!(result.components.is_empty());
    assert!(matches!(result.status, AttributionStatus::FetchFailed { .. }));

    // A failure is retried on the next call rather than cached.
    ctx.component_returns(&prices).await;
    assert_eq!(prices.fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_no_holdings_short_circuits_without_fetch() {
    let registry = StrategyRegistry::new(fund_source());
    let ctx = registry.get_or_create("Cash Only").await.unwrap().unwrap();
    let prices = CountingPriceSource::new(prices());

    let result = ctx.component_returns(&prices).await;

    assert_eq!(result.status, AttributionStatus::NoHoldings);
    assert!(result.as_of_label.is_empty());
    assert!(result.components.is_empty());
    assert_eq!(prices.fetch_count(), 0);
}

// =============================================================================
// PORTFOLIO RETURNS
// =============================================================================

#[tokio::test]
async fn test_mtd_and_ytd_returns() {
    let registry = StrategyRegistry::new(fund_source());
    let ctx = registry.get_or_create("All Weather").await.unwrap().unwrap();
    let prices = CountingPriceSource::new(prices());

    let mtd = ctx.portfolio_mtd_return(&prices).await;
    assert_relative_eq!(mtd, 0.6 * 0.10 + 0.4 * (-0.05), epsilon = 1e-12);

    let today = date("2025-03-10");
    let ytd = ctx.portfolio_ytd_return(&prices, today).await.unwrap();
    let partial = 1.32 / 1.20 - 1.0;
    assert_relative_eq!(ytd, (1.0 + partial) * (1.0 + mtd) - 1.0, epsilon = 1e-12);

    // Both calls reuse the memoized attribution.
    assert_eq!(prices.fetch_count(), 1);
}

#[tokio::test]
async fn test_mtd_is_zero_when_fetch_fails() {
    let registry = StrategyRegistry::new(fund_source());
    let ctx = registry.get_or_create("All Weather").await.unwrap().unwrap();
    let prices = FailingPriceSource::new();

    let mtd = ctx.portfolio_mtd_return(&prices).await;
    assert_relative_eq!(mtd, 0.0);
}
