//! Cumulative return series and derived period returns.

use serde::{Deserialize, Serialize};

use super::Date;

/// One row of the performance table: cumulative growth factors for the
/// fund and its benchmark, anchored at an arbitrary base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnRecord {
    /// Observation date (month end).
    pub date: Date,

    /// Cumulative fund return as a growth factor.
    pub fund: f64,

    /// Cumulative benchmark return as a growth factor.
    pub benchmark: f64,
}

/// A period-over-period observation derived from two consecutive rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodObservation {
    /// Date of the later of the two rows.
    pub date: Date,

    /// Fractional fund return for the period.
    pub fund: f64,

    /// Fractional benchmark return for the period.
    pub benchmark: f64,
}

/// One cell of the monthly-return heatmap payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReturn {
    /// Calendar year.
    pub year: i32,

    /// Calendar month (1-12).
    pub month: u32,

    /// Fractional fund return for that month.
    pub value: f64,
}

/// A normalized cumulative-return series: sorted ascending, unique dates.
///
/// Construction via [`ReturnSeries::from_records`] is the normalization
/// boundary; everything downstream relies on the ordering invariant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    records: Vec<ReturnRecord>,
}

impl ReturnSeries {
    /// Normalizes raw performance rows into a sorted series.
    ///
    /// Rows are stable-sorted by date. Duplicate dates are resolved
    /// last-write-wins (the row appearing later in the input survives);
    /// upstream sources are expected to carry unique dates, so this is a
    /// documented edge case rather than a corrected one. An empty input
    /// yields an explicitly empty series.
    #[must_use]
    pub fn from_records(mut records: Vec<ReturnRecord>) -> Self {
        records.sort_by_key(|r| r.date);

        let mut deduped: Vec<ReturnRecord> = Vec::with_capacity(records.len());
        for rec in records {
            match deduped.last_mut() {
                Some(last) if last.date == rec.date => *last = rec,
                _ => deduped.push(rec),
            }
        }

        Self { records: deduped }
    }

    /// An empty series.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if the series has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// The normalized rows, ascending by date.
    #[must_use]
    pub fn records(&self) -> &[ReturnRecord] {
        &self.records
    }

    /// The last cumulative fund return, if any rows exist.
    #[must_use]
    pub fn last_cumulative(&self) -> Option<f64> {
        self.records.last().map(|r| r.fund)
    }

    /// Period-over-period returns for fund and benchmark.
    ///
    /// The observation at index i of the source rows is
    /// `cumulative[i] / cumulative[i-1] - 1`; the first row has no period
    /// return, so the result has `len() - 1` entries (empty for series
    /// shorter than two rows).
    #[must_use]
    pub fn period_observations(&self) -> Vec<PeriodObservation> {
        self.records
            .windows(2)
            .map(|w| PeriodObservation {
                date: w[1].date,
                fund: w[1].fund / w[0].fund - 1.0,
                benchmark: w[1].benchmark / w[0].benchmark - 1.0,
            })
            .collect()
    }

    /// Fund period returns only.
    #[must_use]
    pub fn fund_period_returns(&self) -> Vec<f64> {
        self.period_observations().iter().map(|p| p.fund).collect()
    }

    /// Monthly fund returns keyed by calendar year and month, for the
    /// heatmap payload.
    #[must_use]
    pub fn monthly_returns(&self) -> Vec<MonthlyReturn> {
        self.period_observations()
            .iter()
            .map(|p| MonthlyReturn {
                year: p.date.year(),
                month: p.date.month(),
                value: p.fund,
            })
            .collect()
    }

    /// Fund return from the last calendar year-end to the latest row.
    ///
    /// Takes the rows dated at or after December 31st of the year before
    /// `today` and composes last/first - 1 over the cumulative values.
    /// Returns `None` when no rows fall in the window or the window's
    /// first cumulative value is zero.
    #[must_use]
    pub fn return_since_year_end(&self, today: Date) -> Option<f64> {
        let year_end = today.previous_year_end().ok()?;
        let window: Vec<&ReturnRecord> =
            self.records.iter().filter(|r| r.date >= year_end).collect();

        let first = window.first()?;
        let last = window.last()?;
        if first.fund == 0.0 {
            return None;
        }
        Some(last.fund / first.fund - 1.0)
    }
}
