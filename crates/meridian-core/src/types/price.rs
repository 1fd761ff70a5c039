//! Adjusted-close price series for held symbols.

use serde::{Deserialize, Serialize};

use super::Date;

/// One adjusted-close observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date.
    pub date: Date,

    /// Adjusted closing price.
    pub close: f64,
}

/// A per-symbol adjusted-close series, ascending by date.
///
/// Owned by the attribution computation for the duration of one fetch;
/// never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series from observations, sorting ascending by date.
    #[must_use]
    pub fn from_points(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self { points }
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// The observations, ascending by date.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Cumulative return over the series: last close / first close - 1.
    ///
    /// Returns `None` for an empty series or a zero first close.
    #[must_use]
    pub fn cumulative_return(&self) -> Option<f64> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        if first.close == 0.0 {
            return None;
        }
        Some(last.close / first.close - 1.0)
    }
}
