//! devprobe Error Types
//!
//! Centralized error handling using thiserror for type-safe errors.

use thiserror::Error;

/// Main error type for probe operations
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A backend module is compiled in but cannot answer the capability query
    #[error("{backend} module exists but {capability}() is not available")]
    CapabilityMissing {
        backend: &'static str,
        capability: &'static str,
    },
    /// A runtime call into the backend failed
    #[error("{backend} backend error: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },
    /// Configuration errors
    #[error("Config Error: {0}")]
    Config(String),
    /// Report serialization errors
    #[error("Serialize Error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ProbeError {
    pub fn capability_missing(backend: &'static str, capability: &'static str) -> Self {
        Self::CapabilityMissing {
            backend,
            capability,
        }
    }

    pub fn backend(backend: &'static str, message: impl Into<String>) -> Self {
        Self::Backend {
            backend,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// True for the one failure the selector downgrades to "unavailable"
    pub fn is_capability_missing(&self) -> bool {
        matches!(self, Self::CapabilityMissing { .. })
    }
}

/// Result type alias for probe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_missing_message() {
        let err = ProbeError::capability_missing("Metal", "is_available");
        assert_eq!(
            err.to_string(),
            "Metal module exists but is_available() is not available"
        );
        assert!(err.is_capability_missing());
    }

    #[test]
    fn test_other_errors_are_not_downgradable() {
        assert!(!ProbeError::backend("CUDA", "driver mismatch").is_capability_missing());
        assert!(!ProbeError::config("bad value").is_capability_missing());
    }
}
