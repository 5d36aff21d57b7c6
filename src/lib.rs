//! # params-rs
//!
//! Declarative per-endpoint request parameter validation for axum
//! controllers, kept apart from persistence-layer model validation.
//!
//! ## Features
//!
//! - **Allow-list Parameters**: Only declared fields survive, everything else is dropped
//! - **Typed Coercion**: `"5"` becomes `5` for integer fields, `"true"` a boolean, etc.
//! - **Accumulated Errors**: Every failing field and rule is reported, not just the first
//! - **Explicit Registry**: Validators are looked up by name in a registry built at startup
//! - **Request Memoization**: A validator runs at most once per request
//! - **Axum Extractors**: `Bound<V>` / `BoundJson<V>` reject bad input with a 400
//! - **Configuration-Based**: Declare validators in YAML or with `define_validator!`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use params::prelude::*;
//!
//! struct CreateFancyResource;
//!
//! impl ParamsValidator for CreateFancyResource {
//!     const NAME: &'static str = "create_fancy_resource";
//! }
//!
//! let registry = ValidatorRegistry::new().with(define_validator!("create_fancy_resource", {
//!     user_id: Integer [required],
//!     fancy_name: String [required, trim, string_length(3, 50)],
//! })?)?;
//!
//! async fn create(BoundJson(params, _): BoundJson<CreateFancyResource>) -> Json<Params> {
//!     // `params` only holds user_id (an integer) and fancy_name
//!     Json(params)
//! }
//!
//! let app = Router::new()
//!     .route("/fancy_resources", post(create))
//!     .with_state(registry);
//! ```

pub mod binding;
pub mod config;
pub mod core;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{
            ConfigError, FieldErrorKind, FieldValidationError, ParamsError, ParamsResult,
            ValidationError,
        },
        field::{FieldFormat, FieldType, FieldValue},
        validation::{
            FieldSpec, Filter, Params, RawInput, Rule, ValidationResult, ValidatorDefinition,
            filters, validators,
        },
    };

    // === Macros ===
    pub use crate::define_validator;

    // === Binding ===
    pub use crate::binding::{
        BindOutcome, Bound, BoundJson, ParamsValidator, RequestCache, ValidatorRegistry, bind,
        resolve,
    };

    // === Config ===
    pub use crate::config::{FieldConfig, ParamsConfig, RuleConfig, ValidatorConfig};

    // === External dependencies ===
    pub use serde::{Deserialize, Serialize};

    // === Axum ===
    pub use axum::{
        Json, Router,
        extract::State,
        routing::{get, post},
    };
}
