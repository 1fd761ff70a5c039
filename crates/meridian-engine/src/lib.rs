//! # Meridian Engine
//!
//! Strategy contexts and caching for the Meridian fund analytics service.
//!
//! A [`StrategyContext`] holds one strategy's normalized return series,
//! holdings snapshot, and allocation maps, loaded once through a
//! [`FundDataSource`](meridian_data::FundDataSource) and immutable
//! afterwards - except the attribution memo, a single explicit cache slot
//! populated on the first successful price fetch.
//!
//! The [`StrategyRegistry`] is the keyed get-or-create store for contexts.
//! It is constructed once and injected into request handlers; contexts are
//! never evicted (restart to refresh). Concurrent first accesses may load
//! the same strategy twice, which is harmless: construction is idempotent
//! and the entries are equivalent.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod context;
pub mod error;
pub mod memo;
pub mod registry;

pub use context::StrategyContext;
pub use error::{EngineError, EngineResult};
pub use memo::AttributionMemo;
pub use registry::{EngineConfig, StrategyRegistry};
