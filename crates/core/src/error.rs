/// Failure of a single article fetch.
///
/// Transport problems (`Network`, `Status`) and shape problems (`Decode`) are
/// kept apart so callers can tell "server unreachable" from "response shape
/// unexpected", even when they react to both the same way.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    #[error("Failed to decode articles: {0}")]
    Decode(String),

    #[error("Invalid article count {0}: must be at least 1")]
    InvalidCount(u32),
}

impl FetchError {
    /// Whether the failure happened at the transport level (unreachable,
    /// timeout, non-2xx).
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_) | FetchError::Status(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, FetchError::Decode(_))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_network() {
        assert!(FetchError::Status(503).is_network());
        assert!(FetchError::Network("connection refused".to_string()).is_network());
        assert!(!FetchError::Status(503).is_decode());
    }

    #[test]
    fn test_decode_is_not_network() {
        let err = FetchError::Decode("missing field `id`".to_string());
        assert!(err.is_decode());
        assert!(!err.is_network());
    }

    #[test]
    fn test_invalid_count_message() {
        let err = FetchError::InvalidCount(0);
        assert_eq!(
            err.to_string(),
            "Invalid article count 0: must be at least 1"
        );
    }
}
