use thiserror::Error;

/// Errors raised when interpreting holiday category identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CategoryError {
    #[error("Unknown holiday category: {0}")]
    Unknown(String),
}

/// Errors raised when validating a calendar request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Year out of range: {0} (expected 1..=9999)")]
    YearOutOfRange(i32),
    #[error("Unknown month name: {0}")]
    UnknownMonth(String),
    #[error("Invalid request payload: {0}")]
    Payload(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_error_display() {
        assert_eq!(
            CategoryError::Unknown("us-federal".to_string()).to_string(),
            "Unknown holiday category: us-federal"
        );
    }

    #[test]
    fn test_request_error_display() {
        assert_eq!(
            RequestError::YearOutOfRange(0).to_string(),
            "Year out of range: 0 (expected 1..=9999)"
        );
        assert_eq!(
            RequestError::UnknownMonth("Smarch".to_string()).to_string(),
            "Unknown month name: Smarch"
        );
    }
}
