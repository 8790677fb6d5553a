//! Error types for the Sitecheck engine

use thiserror::Error;

/// Result type alias using the Sitecheck Error
pub type Result<T> = std::result::Result<T, Error>;

/// Sitecheck error types
#[derive(Error, Debug)]
pub enum Error {
    // === Check registry errors ===
    #[error("Check {check} declares unknown platforms: {platforms:?}")]
    InvalidPlatforms {
        check: String,
        platforms: Vec<String>,
    },

    #[error("Check not found: {check}")]
    CheckNotFound { check: String },

    #[error("Check already registered: {check}")]
    DuplicateCheck { check: String },

    // === Check execution errors ===
    #[error("Check failed: {check} - {message}")]
    CheckFailed { check: String, message: String },

    // === Configuration errors ===
    #[error("Configuration error: {0}")]
    Configuration(String),

    // === Page errors ===
    #[error("Failed to build page: {0}")]
    PageParse(String),

    // === IO / serialization ===
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Per-check failures are suppressed at the audit loop boundary;
    /// everything else propagates to the caller.
    pub fn is_check_failure(&self) -> bool {
        matches!(self, Error::CheckFailed { .. })
    }

    /// Get an error code for logging/metrics
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidPlatforms { .. } => "INVALID_PLATFORMS",
            Error::CheckNotFound { .. } => "CHECK_NOT_FOUND",
            Error::DuplicateCheck { .. } => "DUPLICATE_CHECK",
            Error::CheckFailed { .. } => "CHECK_FAILED",
            Error::Configuration(_) => "CONFIG_ERROR",
            Error::PageParse(_) => "PAGE_PARSE",
            Error::Io(_) => "IO_ERROR",
            Error::Json(_) => "JSON_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_failure_classification() {
        let err = Error::CheckFailed {
            check: "security_headers".into(),
            message: "boom".into(),
        };
        assert!(err.is_check_failure());
        assert_eq!(err.code(), "CHECK_FAILED");

        let err = Error::CheckNotFound {
            check: "nope".into(),
        };
        assert!(!err.is_check_failure());
    }
}
