//! Current-holdings snapshot and allocation maps.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use meridian_core::{Date, HoldingRecord};

/// Summed weights keyed by symbol or sector.
pub type AllocationMap = HashMap<String, f64>;

/// The current-holdings snapshot cut from the full holdings history.
///
/// Only rows carrying the maximum date in the history are current; the
/// anchor date is the earliest date present in the *full* history and
/// marks the purchase reference for attribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldingsSnapshot {
    as_of: Option<Date>,
    anchor_date: Option<Date>,
    holdings: Vec<HoldingRecord>,
}

impl HoldingsSnapshot {
    /// Selects the latest-dated rows from the full holdings history.
    ///
    /// An empty history yields an empty snapshot with no dates.
    #[must_use]
    pub fn from_history(history: &[HoldingRecord]) -> Self {
        let as_of = history.iter().map(|h| h.date).max();
        let anchor_date = history.iter().map(|h| h.date).min();

        let holdings = match as_of {
            Some(latest) => history.iter().filter(|h| h.date == latest).cloned().collect(),
            None => Vec::new(),
        };

        Self {
            as_of,
            anchor_date,
            holdings,
        }
    }

    /// Returns true when the history had no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Snapshot date (the maximum date in the history).
    #[must_use]
    pub fn as_of(&self) -> Option<Date> {
        self.as_of
    }

    /// Purchase anchor date (the minimum date in the history).
    #[must_use]
    pub fn anchor_date(&self) -> Option<Date> {
        self.anchor_date
    }

    /// The current holdings rows.
    #[must_use]
    pub fn holdings(&self) -> &[HoldingRecord] {
        &self.holdings
    }

    /// Weights summed by symbol over the current snapshot.
    ///
    /// Weights are used as-is; incomplete data may not sum to 1 and is
    /// never renormalized.
    #[must_use]
    pub fn allocation_by_symbol(&self) -> AllocationMap {
        let mut map = AllocationMap::new();
        for h in &self.holdings {
            *map.entry(h.symbol.clone()).or_insert(0.0) += h.weight;
        }
        map
    }

    /// Weights summed by sector over the current snapshot.
    ///
    /// Rows without a sector classification are skipped; the map is empty
    /// when no row carries one.
    #[must_use]
    pub fn allocation_by_sector(&self) -> AllocationMap {
        let mut map = AllocationMap::new();
        for h in &self.holdings {
            if let Some(sector) = &h.sector {
                *map.entry(sector.clone()).or_insert(0.0) += h.weight;
            }
        }
        map
    }

    /// Label for the attribution period: the month after the anchor date,
    /// rendered human-readably ("Jun 2024"). `None` for an empty history.
    #[must_use]
    pub fn attribution_period_label(&self) -> Option<String> {
        self.anchor_date
            .and_then(|d| d.add_months(1).ok())
            .map(|d| d.month_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn holding(date: &str, symbol: &str, sector: Option<&str>, weight: f64) -> HoldingRecord {
        let h = HoldingRecord::new(Date::parse(date).unwrap(), symbol, weight);
        match sector {
            Some(s) => h.with_sector(s),
            None => h,
        }
    }

    fn sample_history() -> Vec<HoldingRecord> {
        vec![
            holding("2024-04-30", "AAPL", Some("Technology"), 0.30),
            holding("2024-04-30", "JNJ", Some("Healthcare"), 0.20),
            holding("2024-05-31", "AAPL", Some("Technology"), 0.35),
            holding("2024-05-31", "MSFT", Some("Technology"), 0.25),
            holding("2024-05-31", "JNJ", Some("Healthcare"), 0.20),
        ]
    }

    #[test]
    fn test_snapshot_takes_latest_date_only() {
        let snapshot = HoldingsSnapshot::from_history(&sample_history());
        assert_eq!(snapshot.as_of(), Some(Date::parse("2024-05-31").unwrap()));
        assert_eq!(snapshot.holdings().len(), 3);
    }

    #[test]
    fn test_anchor_is_first_history_date() {
        let snapshot = HoldingsSnapshot::from_history(&sample_history());
        assert_eq!(snapshot.anchor_date(), Some(Date::parse("2024-04-30").unwrap()));
        assert_eq!(snapshot.attribution_period_label().unwrap(), "May 2024");
    }

    #[test]
    fn test_allocation_by_symbol() {
        let snapshot = HoldingsSnapshot::from_history(&sample_history());
        let alloc = snapshot.allocation_by_symbol();

        assert_eq!(alloc.len(), 3);
        assert_relative_eq!(alloc["AAPL"], 0.35);
        assert_relative_eq!(alloc["MSFT"], 0.25);
        assert_relative_eq!(alloc["JNJ"], 0.20);
    }

    #[test]
    fn test_allocation_by_sector_sums_groups() {
        let snapshot = HoldingsSnapshot::from_history(&sample_history());
        let alloc = snapshot.allocation_by_sector();

        assert_eq!(alloc.len(), 2);
        assert_relative_eq!(alloc["Technology"], 0.60);
        assert_relative_eq!(alloc["Healthcare"], 0.20);
    }

    #[test]
    fn test_allocation_totals_match() {
        // With every holding classified, sector totals equal symbol totals.
        let snapshot = HoldingsSnapshot::from_history(&sample_history());
        let by_symbol: f64 = snapshot.allocation_by_symbol().values().sum();
        let by_sector: f64 = snapshot.allocation_by_sector().values().sum();
        let raw: f64 = snapshot.holdings().iter().map(|h| h.weight).sum();

        assert_relative_eq!(by_symbol, raw, epsilon = 1e-12);
        assert_relative_eq!(by_sector, raw, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_sector_rows_are_skipped() {
        let history = vec![
            holding("2024-05-31", "AAPL", None, 0.5),
            holding("2024-05-31", "MSFT", Some("Technology"), 0.3),
        ];
        let snapshot = HoldingsSnapshot::from_history(&history);

        let sector = snapshot.allocation_by_sector();
        assert_eq!(sector.len(), 1);
        assert_relative_eq!(sector["Technology"], 0.3);
    }

    #[test]
    fn test_no_sectors_means_empty_sector_map() {
        let history = vec![holding("2024-05-31", "AAPL", None, 0.5)];
        let snapshot = HoldingsSnapshot::from_history(&history);
        assert!(snapshot.allocation_by_sector().is_empty());
        assert_eq!(snapshot.allocation_by_symbol().len(), 1);
    }

    #[test]
    fn test_empty_history() {
        let snapshot = HoldingsSnapshot::from_history(&[]);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.as_of(), None);
        assert_eq!(snapshot.anchor_date(), None);
        assert_eq!(snapshot.attribution_period_label(), None);
        assert!(snapshot.allocation_by_symbol().is_empty());
        assert!(snapshot.allocation_by_sector().is_empty());
    }

    #[test]
    fn test_duplicate_symbols_sum() {
        let history = vec![
            holding("2024-05-31", "AAPL", Some("Technology"), 0.10),
            holding("2024-05-31", "AAPL", Some("Technology"), 0.15),
        ];
        let snapshot = HoldingsSnapshot::from_history(&history);
        assert_relative_eq!(snapshot.allocation_by_symbol()["AAPL"], 0.25);
    }
}
