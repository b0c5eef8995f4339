//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from fetch and storage errors.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Hour outside the 0-29 service-day range
    #[error("invalid hour {0}: must be 0-29")]
    InvalidHour(u32),

    /// Minute outside 0-59
    #[error("invalid minute {0}: must be 0-59")]
    InvalidMinute(u32),

    /// Time string not in HH:MM form
    #[error("invalid time {0:?}: expected HH:MM")]
    InvalidTimeFormat(String),

    /// Unknown day type name
    #[error("unknown day type {0:?}: expected weekday or holiday")]
    UnknownDayType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::InvalidHour(30);
        assert_eq!(err.to_string(), "invalid hour 30: must be 0-29");

        let err = DomainError::InvalidMinute(60);
        assert_eq!(err.to_string(), "invalid minute 60: must be 0-59");

        let err = DomainError::InvalidTimeFormat("7".into());
        assert_eq!(err.to_string(), "invalid time \"7\": expected HH:MM");

        let err = DomainError::UnknownDayType("sunday".into());
        assert!(err.to_string().contains("weekday or holiday"));
    }
}
