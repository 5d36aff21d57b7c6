//! Field declaration and validation engine
//!
//! Each request/action declares the fields it accepts as a static table of
//! [`FieldSpec`]s. Validating raw input against that table yields either the
//! cleaned, typed parameters or the list of field errors.

pub mod definition;
pub mod field_spec;
pub mod filters;
pub mod macros;
pub mod result;
pub mod rule;
pub mod validators;

pub use definition::ValidatorDefinition;
pub use field_spec::FieldSpec;
pub use result::{Params, RawInput, ValidationResult};
pub use rule::{Filter, Rule};
