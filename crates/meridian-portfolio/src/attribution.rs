//! Per-holding attribution and portfolio MTD/YTD returns.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use meridian_core::{Date, PriceSeries, ReturnSeries};

use crate::allocation::AllocationMap;

/// Outcome of the price fetch behind an attribution run.
///
/// Distinguishes "zero return because the price was flat" from "zero
/// return because the fetch failed", which a bare number conflates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttributionStatus {
    /// Every symbol had price data.
    Complete,

    /// Some symbols were missing from the provider; their returns are
    /// reported as zero.
    Partial {
        /// Symbols with no usable price data, ascending.
        missing: Vec<String>,
    },

    /// The fetch failed entirely; no component returns are available.
    FetchFailed {
        /// Provider error description.
        reason: String,
    },

    /// The snapshot had no symbols; no fetch was attempted.
    NoHoldings,
}

/// Cumulative return of one holding since the anchor date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentReturn {
    /// Instrument ticker symbol.
    pub symbol: String,

    /// Cumulative fractional return since the anchor date.
    pub value: f64,
}

/// Per-holding cumulative returns with their fetch outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentReturns {
    /// Human-readable attribution period label ("Jun 2024"); empty when
    /// the holdings history itself was empty.
    pub as_of_label: String,

    /// Outcome of the price fetch.
    pub status: AttributionStatus,

    /// Component returns, descending by value.
    pub components: Vec<ComponentReturn>,
}

impl ComponentReturns {
    /// An attribution result with no components.
    #[must_use]
    pub fn empty(as_of_label: impl Into<String>, status: AttributionStatus) -> Self {
        Self {
            as_of_label: as_of_label.into(),
            status,
            components: Vec::new(),
        }
    }
}

/// Computes per-symbol cumulative returns from fetched price series.
///
/// Every symbol in `weights` yields a component: symbols missing from
/// `prices` (or with an empty/degenerate series) contribute a zero return
/// rather than an error, so a partial data outage degrades instead of
/// failing. Components are sorted descending by return for presentation.
#[must_use]
pub fn component_returns(
    weights: &AllocationMap,
    prices: &HashMap<String, PriceSeries>,
) -> (Vec<ComponentReturn>, AttributionStatus) {
    let mut missing = Vec::new();
    let mut components: Vec<ComponentReturn> = weights
        .keys()
        .map(|symbol| {
            let value = prices.get(symbol).and_then(PriceSeries::cumulative_return);
            if value.is_none() {
                missing.push(symbol.clone());
            }
            ComponentReturn {
                symbol: symbol.clone(),
                value: value.unwrap_or(0.0),
            }
        })
        .collect();

    components.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });

    let status = if missing.is_empty() {
        AttributionStatus::Complete
    } else {
        missing.sort();
        AttributionStatus::Partial { missing }
    };

    (components, status)
}

/// Portfolio month-to-date return: the weight-return dot product over the
/// symbols present in both the weight map and the component list.
///
/// Symbols missing from either side are dropped from the product, not
/// treated as zero-weight pass-through.
#[must_use]
pub fn portfolio_mtd_return(weights: &AllocationMap, components: &[ComponentReturn]) -> f64 {
    components
        .iter()
        .filter_map(|c| weights.get(&c.symbol).map(|w| w * c.value))
        .sum()
}

/// Portfolio year-to-date return: the fund-level return since the last
/// calendar year-end compounded with the current month-to-date return.
///
/// `None` when the fund series has no rows since the year-end.
#[must_use]
pub fn portfolio_ytd_return(series: &ReturnSeries, mtd: f64, today: Date) -> Option<f64> {
    series
        .return_since_year_end(today)
        .map(|partial| (1.0 + partial) * (1.0 + mtd) - 1.0)
}
