//! Verification client error types.
//!
//! Every variant here is a transport-level failure from the workflow's
//! point of view: the request could not be sent, the service answered with
//! an unexpected status, or the response did not have the expected shape.
//! A well-formed response with `verified: false` is NOT an error; it is a
//! legitimate terminal outcome and never appears in this enum.

/// Errors from verification service calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The service returned a non-2xx status.
    #[error("verifier {endpoint} returned {status}: {body}")]
    UnexpectedStatus {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Client construction error.
    #[error("client configuration error: {reason}")]
    Config { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_status_display() {
        let err = ClientError::UnexpectedStatus {
            endpoint: "/verify".into(),
            status: 503,
            body: "Verification key not loaded".into(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("/verify"));
        assert!(rendered.contains("503"));
        assert!(rendered.contains("key not loaded"));
    }

    #[test]
    fn config_display() {
        let err = ClientError::Config {
            reason: "empty base URL".into(),
        };
        assert!(err.to_string().contains("empty base URL"));
    }
}
