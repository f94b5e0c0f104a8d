//! Error types for the SMERSH client

use thiserror::Error;

/// Result type alias for SMERSH operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

impl Error {
    /// True when the backend answered 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api(ApiError::NotFound(_)))
    }
}

/// Errors raised at the HTTP boundary
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication required. Your session is missing or has expired.")]
    Unauthorized,

    #[error("Access denied. You don't have permission to access this resource.")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// 400 answer; carries the backend description verbatim.
    #[error("{0}")]
    ValidationRejected(String),

    #[error("Method not allowed on {0}. This is a client defect, please report it.")]
    MethodNotAllowed(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("JWT token could not be decoded")]
    InvalidToken,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to the SMERSH server".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Local validation errors of the object model. None of these reach the backend.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Invalid role name: {0}")]
    InvalidRole(String),

    #[error("This {0} has not been saved yet")]
    Draft(&'static str),

    #[error("Field '{0}' references an object without identifier. Set every object identifier before saving.")]
    UnsavedReference(String),

    #[error("{kind} has no field named '{field}'")]
    UnknownField { kind: &'static str, field: String },

    #[error("Field '{field}' of {kind} is not a list")]
    NotAList { kind: &'static str, field: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `smersh init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Server URL not configured. Pass --url or run `smersh init`.")]
    MissingUrl,

    #[error("Certificate file {0} does not exist")]
    MissingCertificate(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
