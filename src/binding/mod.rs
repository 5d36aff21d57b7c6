//! Request binding adapter
//!
//! Given a validator name and the raw input of a request, [`bind`] looks the
//! definition up in a [`ValidatorRegistry`], validates the input at most once
//! per request thanks to the [`RequestCache`], and classifies the result:
//! proceed with the cleaned parameters, or reject with a 400 body.
//!
//! The adapter never performs I/O. Halting the request and writing the
//! rejection is left to the caller (see [`extractor`] for the axum glue).

pub mod cache;
pub mod extractor;
pub mod registry;

pub use cache::RequestCache;
pub use extractor::{Bound, BoundJson, ParamsValidator};
pub use registry::ValidatorRegistry;

use crate::core::error::{ConfigError, FieldValidationError, errors_body};
use crate::core::validation::{Params, RawInput, ValidationResult};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

/// What the caller should do with the request
#[derive(Debug, Clone, PartialEq)]
pub enum BindOutcome {
    /// Input is valid, continue with the cleaned parameters
    Proceed { cleaned: Params },

    /// Input is invalid, answer with `status_code` and `body`
    Reject {
        status_code: StatusCode,
        body: serde_json::Value,
    },
}

impl BindOutcome {
    fn from_result(result: &ValidationResult) -> Self {
        match result {
            ValidationResult::Valid { cleaned } => BindOutcome::Proceed {
                cleaned: cleaned.clone(),
            },
            ValidationResult::Invalid { errors } => BindOutcome::reject(errors),
        }
    }

    fn reject(errors: &[FieldValidationError]) -> Self {
        BindOutcome::Reject {
            status_code: StatusCode::BAD_REQUEST,
            body: errors_body(errors),
        }
    }

    pub fn is_proceed(&self) -> bool {
        matches!(self, BindOutcome::Proceed { .. })
    }

    /// Split into the cleaned parameters or a ready-to-send rejection
    pub fn into_result(self) -> Result<Params, Response> {
        match self {
            BindOutcome::Proceed { cleaned } => Ok(cleaned),
            reject => Err(reject.into_response()),
        }
    }
}

impl IntoResponse for BindOutcome {
    fn into_response(self) -> Response {
        match self {
            BindOutcome::Proceed { cleaned } => Json(cleaned).into_response(),
            BindOutcome::Reject { status_code, body } => (status_code, Json(body)).into_response(),
        }
    }
}

/// Validate `raw` with the validator `name`, memoized in `cache`
///
/// The first call for a name stores its result in the cache whatever the
/// outcome; later calls return that same result without validating again.
pub fn resolve(
    name: &str,
    raw: &RawInput,
    registry: &ValidatorRegistry,
    cache: &mut RequestCache,
) -> Result<Arc<ValidationResult>, ConfigError> {
    if let Some(result) = cache.get(name) {
        tracing::debug!(validator = %name, "params cache hit");
        return Ok(result);
    }

    let definition = registry.resolve(name)?;
    let result = definition.validate(raw);

    match &result {
        ValidationResult::Valid { cleaned } => {
            tracing::debug!(validator = %name, fields = cleaned.len(), "params accepted");
        }
        ValidationResult::Invalid { errors } => {
            tracing::debug!(validator = %name, errors = errors.len(), "params rejected");
        }
    }

    Ok(cache.store(name, result))
}

/// Validate and classify the request input for validator `name`
///
/// Fails only on setup errors (`UnknownValidator`); bad input is a
/// [`BindOutcome::Reject`], never an error.
pub fn bind(
    name: &str,
    raw: &RawInput,
    registry: &ValidatorRegistry,
    cache: &mut RequestCache,
) -> Result<BindOutcome, ConfigError> {
    let result = resolve(name, raw, registry, cache)?;
    Ok(BindOutcome::from_result(&result))
}

impl ValidatorRegistry {
    /// [`bind`] against this registry
    pub fn bind(
        &self,
        name: &str,
        raw: &RawInput,
        cache: &mut RequestCache,
    ) -> Result<BindOutcome, ConfigError> {
        bind(name, raw, self, cache)
    }
}
