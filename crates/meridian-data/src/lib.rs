//! # Meridian Data
//!
//! Data source seams for the Meridian fund analytics service:
//!
//! - [`FundDataSource`]: per-strategy performance and holdings tables
//! - [`PriceSource`]: adjusted-close series for held symbols
//!
//! This crate provides default implementations for testing, EOD loads,
//! and static data:
//! - CSV-backed fund data and price sources
//! - In-memory sources for tests and demo wiring
//! - An empty price source that omits every symbol
//!
//! For production market data, plug a provider-specific implementation of
//! [`PriceSource`] into the engine.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
mod file;
mod memory;
mod sources;

pub use error::DataError;
pub use file::{CsvFundSource, CsvPriceSource};
pub use memory::{EmptyPriceSource, InMemoryFundSource, StaticPriceSource};
pub use sources::{FundDataSource, PriceSource};
