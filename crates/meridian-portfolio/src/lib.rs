//! # Meridian Portfolio
//!
//! Holdings-level computations for the Meridian fund analytics service:
//!
//! - **Allocation Aggregator**: current-holdings snapshot selection and
//!   weight sums by symbol and by sector
//! - **Attribution**: per-holding cumulative return since purchase,
//!   portfolio month-to-date return (weight dot product), and
//!   year-to-date return (compounded with the fund series)
//!
//! All functions here are pure; fetching and memoization of price data
//! live in `meridian-engine`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod allocation;
pub mod attribution;

pub use allocation::{AllocationMap, HoldingsSnapshot};
pub use attribution::{
    component_returns, portfolio_mtd_return, portfolio_ytd_return, AttributionStatus,
    ComponentReturn, ComponentReturns,
};
