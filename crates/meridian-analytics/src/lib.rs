//! # Meridian Analytics
//!
//! The performance-metrics engine: pure functions that turn a normalized
//! [`ReturnSeries`](meridian_core::ReturnSeries) into annualized return,
//! volatility, Sharpe ratio, maximum drawdown, alpha/beta versus the
//! benchmark, and the rest of the dashboard's scalar metrics.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: metrics are a function of the input series only
//! - **Explicit absence**: degenerate inputs make individual fields `None`,
//!   rendered as `"N/A"` in the formatted report; nothing ever panics
//! - **Formatting is contract**: the dashboard displays the formatted
//!   report verbatim, so [`MetricsReport`] owns the display rules

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod metrics;

pub use metrics::{MetricsReport, PerformanceMetrics, NOT_AVAILABLE};
