//! # Meridian Core
//!
//! Core types for the Meridian fund performance analytics service.
//!
//! This crate provides the foundational building blocks used throughout
//! Meridian:
//!
//! - **`Date`**: calendar date newtype for monthly observation dates
//! - **`ReturnSeries`**: normalized cumulative-return series (fund + benchmark)
//! - **`HoldingRecord`**: one holdings-table row (date, symbol, sector, weight)
//! - **`PriceSeries`**: adjusted-close series fetched per held symbol
//!
//! ## Design Philosophy
//!
//! - **Normalize once**: raw rows become a sorted, unique-dated `ReturnSeries`
//!   at the boundary; everything downstream assumes the invariant
//! - **Explicit absence**: degenerate inputs produce empty series or `None`,
//!   never panics

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use types::{
    Date, HoldingRecord, MonthlyReturn, PeriodObservation, PricePoint, PriceSeries, ReturnRecord,
    ReturnSeries,
};
