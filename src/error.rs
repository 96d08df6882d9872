//! Error types for vigil operations.

use thiserror::Error;

/// Result type alias for vigil operations.
pub type Result<T> = std::result::Result<T, VigilError>;

/// Errors that can occur while querying or commanding the platform API.
#[derive(Error, Debug)]
pub enum VigilError {
    /// Transport-level HTTP failure (connection refused, DNS, TLS, ...).
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform API answered with a non-success status code.
    #[error("API returned HTTP {code}: {body}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Response body, if any.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The configured base URL could not be parsed.
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    /// The model has no endpoint, so there is nothing to query.
    #[error("model has no endpoint to query")]
    MissingEndpoint,

    /// Writing to the system clipboard failed.
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A model was not found on the platform.
    #[error("model not found: {0}")]
    ModelNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_status() {
        let err = VigilError::Status {
            code: 404,
            body: "endpoint not found".to_string(),
        };
        assert_eq!(err.to_string(), "API returned HTTP 404: endpoint not found");
    }

    #[test]
    fn test_error_display_malformed() {
        let err = VigilError::MalformedResponse("missing field `endpoint_status`".to_string());
        assert_eq!(
            err.to_string(),
            "malformed response: missing field `endpoint_status`"
        );
    }

    #[test]
    fn test_error_display_missing_endpoint() {
        assert_eq!(
            VigilError::MissingEndpoint.to_string(),
            "model has no endpoint to query"
        );
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = VigilError::from(json_err);
        assert!(matches!(err, VigilError::Json(_)));
    }
}
