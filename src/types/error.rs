//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//! Failures of the two remote services (workspace API, text generation API)
//! are classified so the CLI can print a descriptive message.
//!
//! ## Error Categories
//!
//! - **Auth**: Token rejected (401/403)
//! - **RateLimit**: API rate limiting (429)
//! - **NotFound**: Object missing or not shared with the integration (404)
//! - **Network**: Connectivity issues
//! - **Unavailable**: Server side failure (5xx)
//!
//! Nothing here is retried. Errors are reported once and the caller decides
//! how to present them.

use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Error categories used to describe remote failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Token missing, invalid, or lacking access
    Auth,
    /// Rate limited by the remote service
    RateLimit,
    /// Invalid request (bad id, malformed filter, ...)
    BadRequest,
    /// Object not found or not shared with the integration
    NotFound,
    /// Remote service failed (5xx)
    Unavailable,
    /// Connectivity issues (DNS, refused, timeout)
    Network,
    /// Response body could not be decoded
    ParseError,
    /// Anything else
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auth => write!(f, "AUTH"),
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::Network => write!(f, "NETWORK"),
            Self::ParseError => write!(f, "PARSE_ERROR"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl ErrorCategory {
    /// Short hint shown to the user next to the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Auth => Some("check your token and that the integration has access"),
            Self::NotFound => Some("make sure the page is shared with the integration"),
            Self::RateLimit => Some("wait a moment before running the command again"),
            Self::Network => Some("check your network connection"),
            _ => None,
        }
    }
}

// =============================================================================
// API Error
// =============================================================================

/// Failure reported by one of the remote services
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Service that produced the error ("notion", "gemini")
    pub service: String,
    /// Error category
    pub category: ErrorCategory,
    /// HTTP status, when the failure came with a response
    pub status: Option<u16>,
    /// Detailed error message (response body or transport message)
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(
                f,
                "[{}:{}] HTTP {}: {}",
                self.service, self.category, status, self.message
            ),
            None => write!(f, "[{}:{}] {}", self.service, self.category, self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn new(
        service: impl Into<String>,
        category: ErrorCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            category,
            status: None,
            message: message.into(),
        }
    }

    /// Attach the HTTP status that produced this error
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Maps raw failures to categorized `ApiError`s
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify an HTTP status code
    pub fn classify_http_status(status: u16, message: &str, service: &str) -> ApiError {
        let category = match status {
            401 | 403 => ErrorCategory::Auth,
            429 => ErrorCategory::RateLimit,
            400 | 409 | 422 => ErrorCategory::BadRequest,
            404 => ErrorCategory::NotFound,
            500..=599 => ErrorCategory::Unavailable,
            _ => ErrorCategory::Unknown,
        };
        ApiError::new(service, category, message).with_status(status)
    }

    /// Classify a transport-level failure (no usable response)
    pub fn classify_transport(err: &reqwest::Error, service: &str) -> ApiError {
        let category = if err.is_connect() || err.is_timeout() || err.is_request() {
            ErrorCategory::Network
        } else if err.is_decode() || err.is_body() {
            ErrorCategory::ParseError
        } else {
            ErrorCategory::Unknown
        };
        let api_error = ApiError::new(service, category, err.to_string());
        match err.status() {
            Some(status) => api_error.with_status(status.as_u16()),
            None => api_error,
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum CoachError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // -------------------------------------------------------------------------
    // Remote Errors
    // -------------------------------------------------------------------------
    #[error("API error: {0}")]
    Api(ApiError),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("Not connected: {0}")]
    NotConnected(String),

    #[error("Workspace not loaded: call load_workspace first")]
    WorkspaceNotLoaded,

    #[error("No dance matches '{0}'. Run 'dancesport dances' to list them")]
    Selection(String),

    #[error("{0}")]
    Context(String),
}

impl From<ApiError> for CoachError {
    fn from(err: ApiError) -> Self {
        CoachError::Api(err)
    }
}

pub type Result<T> = std::result::Result<T, CoachError>;

impl CoachError {
    /// Category of the underlying remote failure, if any
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            Self::Api(e) => Some(e.category),
            _ => None,
        }
    }

    /// Configuration or connection problems; these end the CLI with a failure code
    pub fn is_setup_failure(&self) -> bool {
        match self {
            Self::Config(_) | Self::NotConnected(_) => true,
            Self::Api(e) => matches!(e.category, ErrorCategory::Auth | ErrorCategory::Network),
            _ => false,
        }
    }
}

/// Context extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> Result<T>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|e| CoachError::Context(format!("{}: {}", context.into(), e)))
    }
}

// =============================================================================
// Tests
// =============================================================================
