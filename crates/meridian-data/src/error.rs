//! Error types for data source operations.

use thiserror::Error;

/// Common error type for data source operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// Requested strategy or table not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Parse/deserialization error
    #[error("parse error: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// External provider unavailable
    #[error("source not available: {0}")]
    SourceNotAvailable(String),
}

impl From<std::io::Error> for DataError {
    fn from(e: std::io::Error) -> Self {
        DataError::IoError(e.to_string())
    }
}

impl DataError {
    /// Returns true for the not-found variant, which maps to an absent
    /// strategy rather than a request-level failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = DataError::NotFound("all_weather_performance".to_string());
        assert!(err.to_string().contains("all_weather_performance"));
        assert!(err.is_not_found());
        assert!(!DataError::SourceNotAvailable("provider down".into()).is_not_found());
    }
}
