//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Archive record could not be decoded
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Record declares a `usUnits` code that is not a known weewx unit system
    #[error("Unknown unit system code: {0}")]
    UnknownUnitSystem(i64),

    /// Record timestamp is outside the representable range
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_record_error_message() {
        let err = DomainError::InvalidRecord("expected value".to_string());
        assert_eq!(err.to_string(), "Invalid record: expected value");
    }

    #[test]
    fn unknown_unit_system_error_message() {
        let err = DomainError::UnknownUnitSystem(42);
        assert_eq!(err.to_string(), "Unknown unit system code: 42");
    }
}
