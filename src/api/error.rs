//! API error types for the platform REST API

use std::fmt;

/// Errors that can occur when calling the platform API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 401 Unauthorized - token missing, invalid or expired
    Unauthorized { endpoint: String },
    /// 403 Forbidden - the user may not touch this resource
    Forbidden { endpoint: String },
    /// 404 Not Found
    NotFound { endpoint: String },
    /// 429 Rate Limited
    RateLimited {
        endpoint: String,
        retry_after_secs: Option<u64>,
    },
    /// Request rejected by the server's validation (400/422)
    Rejected { endpoint: String, message: String },
    /// Connection, DNS or timeout failure
    NetworkError { endpoint: String, message: String },
    /// Other non-success HTTP status
    HttpError {
        endpoint: String,
        status: u16,
        message: String,
    },
    /// Response body did not match the expected shape
    ParseError { endpoint: String, message: String },
}

impl ApiError {
    /// Check if this is an authentication error (401 or 403)
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized { .. } | ApiError::Forbidden { .. }
        )
    }

    /// Check if the request could succeed if the user tries again later
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::RateLimited { .. } | ApiError::NetworkError { .. } => true,
            ApiError::HttpError { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Endpoint path the failing request was sent to
    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::Unauthorized { endpoint }
            | ApiError::Forbidden { endpoint }
            | ApiError::NotFound { endpoint }
            | ApiError::RateLimited { endpoint, .. }
            | ApiError::Rejected { endpoint, .. }
            | ApiError::NetworkError { endpoint, .. }
            | ApiError::HttpError { endpoint, .. }
            | ApiError::ParseError { endpoint, .. } => endpoint,
        }
    }

    pub fn network(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::NetworkError {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn parse(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::ParseError {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Map a non-success HTTP status and body to an error
    pub fn from_status(
        endpoint: impl Into<String>,
        status: u16,
        body: impl Into<String>,
        retry_after_secs: Option<u64>,
    ) -> Self {
        let endpoint = endpoint.into();
        match status {
            400 | 422 => ApiError::Rejected {
                endpoint,
                message: extract_message(&body.into()),
            },
            401 => ApiError::Unauthorized { endpoint },
            403 => ApiError::Forbidden { endpoint },
            404 => ApiError::NotFound { endpoint },
            429 => ApiError::RateLimited {
                endpoint,
                retry_after_secs,
            },
            _ => ApiError::HttpError {
                endpoint,
                status,
                message: extract_message(&body.into()),
            },
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// The platform answers errors with `{"message": "..."}` or
/// `{"error": "..."}`; anything else is passed through trimmed.
fn extract_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    body.trim().to_string()
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized { endpoint } => {
                write!(f, "{}: Unauthorized (401) - check the API token", endpoint)
            }
            ApiError::Forbidden { endpoint } => {
                write!(f, "{}: Forbidden (403) - insufficient permissions", endpoint)
            }
            ApiError::NotFound { endpoint } => write!(f, "{}: Not found (404)", endpoint),
            ApiError::RateLimited {
                endpoint,
                retry_after_secs,
            } => {
                if let Some(secs) = retry_after_secs {
                    write!(f, "{}: Rate limited - retry after {}s", endpoint, secs)
                } else {
                    write!(f, "{}: Rate limited", endpoint)
                }
            }
            ApiError::Rejected { endpoint, message } => {
                write!(f, "{}: Rejected - {}", endpoint, message)
            }
            ApiError::NetworkError { endpoint, message } => {
                write!(f, "{}: Network error - {}", endpoint, message)
            }
            ApiError::HttpError {
                endpoint,
                status,
                message,
            } => {
                write!(f, "{}: HTTP {} - {}", endpoint, status, message)
            }
            ApiError::ParseError { endpoint, message } => {
                write!(f, "{}: Unexpected response - {}", endpoint, message)
            }
        }
    }
}

impl std::error::Error for ApiError {}
