//! Error types for the engine crate.

use thiserror::Error;

use meridian_data::DataError;

/// A specialized Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors crossing the engine boundary.
///
/// Only structural failures surface here; data-quality issues are
/// absorbed into sentinel values inside the analytics and attribution
/// computations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A data source failed while loading a strategy context.
    #[error("data source error: {0}")]
    Source(#[from] DataError),
}
