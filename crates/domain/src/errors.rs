//! Error types used throughout the SDK

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the Dressipi SDK
///
/// Every failure a consumer can observe is one of these variants. The
/// services (auth, discovery) return them as `Err`; the stateful layers
/// (`AuthSession`, the fetchers) catch them and convert them into state so
/// they never escape to the caller as panics.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum DressipiError {
    /// Authentication failed: a 401/403 from a discovery endpoint, or an
    /// auth-flow failure that is not a state mismatch
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// The `state` returned by the authorization endpoint did not match the
    /// one sent. CSRF defense; fatal, never retried.
    #[error("State mismatch in Dressipi authentication")]
    StateMismatch,

    /// The related-items endpoint reported the source garment as unknown.
    /// An expected no-data condition, not an application error.
    #[error("Garment not found")]
    GarmentNotFound,

    /// Transport-level failure, wrapped with a stage-identifying prefix
    #[error("Network error: {0}")]
    Network(String),

    /// A request failed local validation before any network call
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The response was internally inconsistent or in an unknown shape
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// Credential store operation failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration was missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DressipiError {
    /// True for errors the fetch layer answers with a single forced
    /// credential refresh.
    #[must_use]
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// True for the expected "no data" outcome of a related-items lookup.
    #[must_use]
    pub fn is_garment_not_found(&self) -> bool {
        matches!(self, Self::GarmentNotFound)
    }
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, DressipiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_mismatch_message_is_fixed() {
        let err = DressipiError::StateMismatch;
        assert_eq!(err.to_string(), "State mismatch in Dressipi authentication");
    }

    #[test]
    fn authentication_classification() {
        assert!(DressipiError::Authentication("401".into()).is_authentication());
        assert!(!DressipiError::Network("timeout".into()).is_authentication());
        assert!(!DressipiError::GarmentNotFound.is_authentication());
    }

    #[test]
    fn garment_not_found_classification() {
        assert!(DressipiError::GarmentNotFound.is_garment_not_found());
        assert!(!DressipiError::Validation("missing item_id".into()).is_garment_not_found());
    }

    #[test]
    fn errors_serialize_as_tagged_values() {
        let err = DressipiError::Network("connection reset".into());
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"Network\""));
        assert!(json.contains("connection reset"));
    }
}
