//! Scalar risk/performance metrics over a return series.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use meridian_core::{PeriodObservation, ReturnSeries};

/// Marker rendered for metrics that cannot be computed from the input.
pub const NOT_AVAILABLE: &str = "N/A";

/// Months per year, for annualizing monthly observations.
const PERIODS_PER_YEAR: f64 = 12.0;

/// Numeric performance metrics for a fund versus its benchmark.
///
/// Every field is `None` when the input series is too short or degenerate
/// for the metric to be defined. Use [`PerformanceMetrics::report`] for
/// the formatted values the dashboard displays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Mean monthly return times 12.
    pub annualized_return: Option<f64>,

    /// Sample standard deviation of monthly returns times sqrt(12).
    pub volatility: Option<f64>,

    /// Annualized return over volatility, zero risk-free rate. Zero when
    /// volatility is zero.
    pub sharpe_ratio: Option<f64>,

    /// Deepest decline from a running peak of the compounded return curve,
    /// as a negative fraction.
    pub max_drawdown: Option<f64>,

    /// OLS intercept of fund monthly returns on benchmark monthly returns.
    pub alpha: Option<f64>,

    /// OLS slope of fund monthly returns on benchmark monthly returns.
    pub beta: Option<f64>,

    /// Last cumulative return minus one.
    pub total_return: Option<f64>,

    /// Best single monthly return.
    pub best_month: Option<f64>,

    /// Worst single monthly return.
    pub worst_month: Option<f64>,

    /// Fraction of months with a positive return.
    pub pos_month_pct: Option<f64>,

    /// Pearson correlation of fund and benchmark monthly returns.
    pub corr: Option<f64>,
}

impl PerformanceMetrics {
    /// Computes all metrics from a normalized return series.
    ///
    /// Pure function of the input; an empty series yields all-`None`.
    #[must_use]
    pub fn calculate(series: &ReturnSeries) -> Self {
        if series.is_empty() {
            return Self::default();
        }

        let periods = series.period_observations();
        let fund: Vec<f64> = periods.iter().map(|p| p.fund).collect();

        let annualized_return = if fund.is_empty() {
            None
        } else {
            Some((&fund[..]).mean() * PERIODS_PER_YEAR)
        };

        // Sample standard deviation needs at least two observations.
        let volatility = if fund.len() < 2 {
            None
        } else {
            Some((&fund[..]).std_dev() * PERIODS_PER_YEAR.sqrt())
        };

        let sharpe_ratio = match (annualized_return, volatility) {
            (Some(ret), Some(vol)) if vol > 0.0 => Some(ret / vol),
            (Some(_), Some(_)) => Some(0.0),
            _ => None,
        };

        let max_drawdown = max_drawdown(&fund);

        let (alpha, beta, corr) = regression(&periods);

        let total_return = series.last_cumulative().map(|c| c - 1.0);

        let best_month = fund.iter().copied().fold(None, |acc: Option<f64>, r| {
            Some(acc.map_or(r, |a| a.max(r)))
        });
        let worst_month = fund.iter().copied().fold(None, |acc: Option<f64>, r| {
            Some(acc.map_or(r, |a| a.min(r)))
        });

        let pos_month_pct = if fund.is_empty() {
            None
        } else {
            let positive = fund.iter().filter(|&&r| r > 0.0).count();
            Some(positive as f64 / fund.len() as f64)
        };

        Self {
            annualized_return,
            volatility,
            sharpe_ratio,
            max_drawdown,
            alpha,
            beta,
            total_return,
            best_month,
            worst_month,
            pos_month_pct,
            corr,
        }
    }

    /// Renders the formatted report the dashboard displays verbatim.
    #[must_use]
    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            annualized_return: fmt_pct1(self.annualized_return),
            volatility: fmt_pct1(self.volatility),
            sharpe_ratio: fmt_dec2(self.sharpe_ratio),
            max_drawdown: fmt_pct1(self.max_drawdown),
            alpha: fmt_pct2(self.alpha),
            beta: fmt_dec2(self.beta),
            total_return: fmt_pct0(self.total_return),
            best_month: fmt_pct1(self.best_month),
            worst_month: fmt_pct1(self.worst_month),
            pos_month_pct: fmt_pct0(self.pos_month_pct),
            corr: fmt_dec2(self.corr),
        }
    }
}

/// Deepest drawdown of the curve compounded from period returns.
///
/// Curve value at t is the running product of (1 + return); drawdown at t
/// is (curve - running peak) / running peak. Returns the minimum, which is
/// zero for a series that never falls below a prior peak.
fn max_drawdown(returns: &[f64]) -> Option<f64> {
    if returns.is_empty() {
        return None;
    }

    let mut curve = 1.0_f64;
    let mut peak = f64::MIN;
    let mut worst = f64::MAX;

    for r in returns {
        curve *= 1.0 + r;
        peak = peak.max(curve);
        worst = worst.min((curve - peak) / peak);
    }

    Some(worst)
}

/// OLS alpha/intercept, beta/slope, and Pearson correlation of fund
/// returns on benchmark returns.
///
/// Pairs where either side is non-finite are dropped. All three are `None`
/// with fewer than two valid pairs or zero variance on either side.
fn regression(periods: &[PeriodObservation]) -> (Option<f64>, Option<f64>, Option<f64>) {
    let pairs: Vec<(f64, f64)> = periods
        .iter()
        .filter(|p| p.benchmark.is_finite() && p.fund.is_finite())
        .map(|p| (p.benchmark, p.fund))
        .collect();

    if pairs.len() < 2 {
        return (None, None, None);
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if sxx == 0.0 {
        return (None, None, None);
    }

    let beta = sxy / sxx;
    let alpha = mean_y - beta * mean_x;
    let corr = if syy == 0.0 {
        None
    } else {
        Some(sxy / (sxx * syy).sqrt())
    };

    (Some(alpha), Some(beta), corr)
}

/// The formatted metrics the presentation layer displays verbatim.
///
/// Percent fields carry one decimal place, except `total_return` and
/// `pos_month_pct` (integer percent) and `alpha` (two decimals). Ratios
/// (`sharpe_ratio`, `beta`, `corr`) are plain two-decimal numbers. Absent
/// values render as [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Annualized return, e.g. "12.9%".
    pub annualized_return: String,
    /// Annualized volatility, e.g. "8.4%".
    pub volatility: String,
    /// Sharpe ratio, e.g. "1.53".
    pub sharpe_ratio: String,
    /// Maximum drawdown, e.g. "-7.1%".
    pub max_drawdown: String,
    /// Monthly alpha, e.g. "0.21%".
    pub alpha: String,
    /// Beta versus the benchmark, e.g. "0.87".
    pub beta: String,
    /// Total return, e.g. "34%".
    pub total_return: String,
    /// Best month, e.g. "5.0%".
    pub best_month: String,
    /// Worst month, e.g. "-2.9%".
    pub worst_month: String,
    /// Share of positive months, e.g. "63%".
    pub pos_month_pct: String,
    /// Correlation with the benchmark, e.g. "0.91".
    pub corr: String,
}

fn fmt_pct1(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{:.1}%", v * 100.0))
}

fn fmt_pct0(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{:.0}%", v * 100.0))
}

fn fmt_pct2(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{:.2}%", v * 100.0))
}

fn fmt_dec2(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v:.2}"))
}
