//! Typed error handling for params-rs
//!
//! Two families of failures exist and they never mix:
//!
//! - [`ConfigError`]: the validator setup is wrong (duplicate field, unknown
//!   validator name, unparsable YAML). These are bugs, surfaced as 500.
//! - [`ValidationError`]: the caller sent bad input. These end at the binding
//!   boundary as a 400 response.
//!
//! Per-field problems found while validating (missing, wrong type, failed rule)
//! are not errors at all: they are [`FieldValidationError`] values carried by
//! `ValidationResult::Invalid`.
//!
//! # Example
//!
//! ```rust,ignore
//! use params::prelude::*;
//!
//! match registry.resolve("create_invoice") {
//!     Ok(definition) => { /* ... */ }
//!     Err(ConfigError::UnknownValidator { name }) => {
//!         panic!("validator {} was never registered", name);
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for params-rs
#[derive(Debug)]
pub enum ParamsError {
    /// Validator setup errors
    Config(ConfigError),

    /// Bad request input
    Validation(ValidationError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::Config(e) => write!(f, "{}", e),
            ParamsError::Validation(e) => write!(f, "{}", e),
            ParamsError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ParamsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParamsError::Config(e) => Some(e),
            ParamsError::Validation(e) => Some(e),
            ParamsError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ParamsError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ParamsError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ParamsError::Validation(ValidationError::PayloadTooLarge { .. }) => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            ParamsError::Validation(_) => StatusCode::BAD_REQUEST,
            ParamsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ParamsError::Config(e) => e.error_code(),
            ParamsError::Validation(e) => e.error_code(),
            ParamsError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ParamsError::Config(ConfigError::DuplicateField { validator, field }) => {
                Some(serde_json::json!({ "validator": validator, "field": field }))
            }
            ParamsError::Config(ConfigError::UnknownValidator { name }) => {
                Some(serde_json::json!({ "validator": name }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ParamsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            // Field errors keep the plain `{"errors": [...]}` shape clients rely on
            ParamsError::Validation(ValidationError::FieldErrors(errors)) => {
                (status, Json(errors_body(&errors))).into_response()
            }
            other => (status, Json(other.to_response())).into_response(),
        }
    }
}

/// Build the `{"errors": [{"field": .., "message": ..}, ..]}` rejection body
pub fn errors_body(errors: &[FieldValidationError]) -> serde_json::Value {
    serde_json::json!({ "errors": errors })
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors in the validator setup
///
/// These indicate a programming or deployment mistake, never bad input.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Two fields of one definition share a name
    DuplicateField { validator: String, field: String },

    /// Two definitions registered under the same name
    DuplicateValidator { name: String },

    /// No definition registered under this name
    UnknownValidator { name: String },

    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    FileNotFound { path: String },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DuplicateField { validator, field } => {
                write!(
                    f,
                    "Field '{}' is declared more than once in validator '{}'",
                    field, validator
                )
            }
            ConfigError::DuplicateValidator { name } => {
                write!(f, "Validator '{}' is already registered", name)
            }
            ConfigError::UnknownValidator { name } => {
                write!(f, "Unknown validator: {}", name)
            }
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::DuplicateField { .. } => "DUPLICATE_FIELD",
            ConfigError::DuplicateValidator { .. } => "DUPLICATE_VALIDATOR",
            ConfigError::UnknownValidator { .. } => "UNKNOWN_VALIDATOR",
            ConfigError::ParseError { .. }
            | ConfigError::InvalidValue { .. }
            | ConfigError::FileNotFound { .. }
            | ConfigError::IoError { .. } => "CONFIG_ERROR",
        }
    }
}

impl From<ConfigError> for ParamsError {
    fn from(err: ConfigError) -> Self {
        ParamsError::Config(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors caused by the request input
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// One or more fields failed validation
    FieldErrors(Vec<FieldValidationError>),

    /// Request body is not a JSON object
    InvalidJson { message: String },

    /// Query string could not be decoded
    InvalidQuery { message: String },

    /// Request body exceeds the body limit
    PayloadTooLarge { message: String },
}

/// What went wrong with a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// Required field absent, null or empty
    Required,
    /// Value could not be coerced to the declared type
    InvalidType,
    /// A declared rule rejected the coerced value
    Rule { rule: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
    #[serde(skip)]
    pub kind: FieldErrorKind,
}

impl FieldValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: "required".to_string(),
            kind: FieldErrorKind::Required,
        }
    }

    pub fn invalid_type(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: "invalid type".to_string(),
            kind: FieldErrorKind::InvalidType,
        }
    }

    pub fn rule(
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind: FieldErrorKind::Rule { rule: rule.into() },
        }
    }
}

impl fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidJson { message } => {
                write!(f, "Invalid JSON: {}", message)
            }
            ValidationError::InvalidQuery { message } => {
                write!(f, "Invalid query string: {}", message)
            }
            ValidationError::PayloadTooLarge { message } => {
                write!(f, "Payload too large: {}", message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::FieldErrors(_) => "VALIDATION_ERROR",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
            ValidationError::InvalidQuery { .. } => "INVALID_QUERY",
            ValidationError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
        }
    }
}

impl From<ValidationError> for ParamsError {
    fn from(err: ValidationError) -> Self {
        ParamsError::Validation(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for ParamsError {
    fn from(err: serde_json::Error) -> Self {
        ParamsError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ParamsError {
    fn from(err: std::io::Error) -> Self {
        ParamsError::Config(err.into())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ParamsError {
    fn from(err: serde_yaml::Error) -> Self {
        ParamsError::Config(err.into())
    }
}

impl From<anyhow::Error> for ParamsError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ConfigError>() {
            Ok(config) => ParamsError::Config(config),
            Err(err) => ParamsError::Internal(err.to_string()),
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for params-rs operations
pub type ParamsResult<T> = Result<T, ParamsError>;
