//! Holdings table rows.

use serde::{Deserialize, Serialize};

use super::Date;

/// One row of the holdings table.
///
/// Weight is a fraction of portfolio value. The full history may carry
/// many dates; only rows at the maximum date form the current snapshot
/// (selection lives in `meridian-portfolio`). Weights are not guaranteed
/// to sum to 1 when upstream data is incomplete, and are used as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingRecord {
    /// Date the weight was recorded.
    pub date: Date,

    /// Instrument ticker symbol.
    pub symbol: String,

    /// Sector classification, when the source provides one.
    pub sector: Option<String>,

    /// Portfolio weight as a fraction.
    pub weight: f64,
}

impl HoldingRecord {
    /// Creates a holdings row without a sector classification.
    #[must_use]
    pub fn new(date: Date, symbol: impl Into<String>, weight: f64) -> Self {
        Self {
            date,
            symbol: symbol.into(),
            sector: None,
            weight,
        }
    }

    /// Attaches a sector classification.
    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }
}
