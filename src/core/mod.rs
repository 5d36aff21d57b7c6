//! Core module containing field types, errors and the validation engine

pub mod error;
pub mod field;
pub mod validation;

pub use error::{
    ConfigError, FieldErrorKind, FieldValidationError, ParamsError, ParamsResult, ValidationError,
};
pub use field::{FieldFormat, FieldType, FieldValue};
pub use validation::{FieldSpec, Params, RawInput, ValidationResult, ValidatorDefinition};
