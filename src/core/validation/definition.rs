//! Validator definitions and the validation engine

use super::field_spec::FieldSpec;
use super::result::{Params, RawInput, ValidationResult};
use crate::core::error::{ConfigError, FieldValidationError};
use serde_json::Value;
use std::collections::HashSet;

/// Named collection of field declarations for one request/action
///
/// Field names are unique and declaration order is kept: errors and cleaned
/// parameters come out in that order.
#[derive(Debug, Clone)]
pub struct ValidatorDefinition {
    name: String,
    fields: Vec<FieldSpec>,
}

impl ValidatorDefinition {
    /// Build a definition, rejecting duplicate field names
    pub fn define(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = FieldSpec>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let fields: Vec<FieldSpec> = fields.into_iter().collect();

        {
            let mut seen = HashSet::new();
            for field in &fields {
                if !seen.insert(field.name()) {
                    return Err(ConfigError::DuplicateField {
                        validator: name,
                        field: field.name().to_string(),
                    });
                }
            }
        }

        Ok(Self { name, fields })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Validate raw input against the declared fields
    ///
    /// Undeclared keys are dropped. A missing required field reports
    /// `"required"` and skips its other checks; a value that cannot be coerced
    /// reports `"invalid type"` and skips its rules. Every failing rule
    /// reports its own message.
    pub fn validate(&self, raw: &RawInput) -> ValidationResult {
        let mut cleaned = Params::new();
        let mut errors = Vec::new();

        for spec in &self.fields {
            let value = raw
                .get(spec.name())
                .cloned()
                .map(|value| spec.filters().iter().fold(value, |v, f| f.apply(v)));

            let value = match value {
                Some(value) if !is_missing(&value) => value,
                _ => {
                    if spec.is_required() {
                        errors.push(FieldValidationError::required(spec.name()));
                    }
                    continue;
                }
            };

            let Some(coerced) = spec.field_type().coerce(&value) else {
                errors.push(FieldValidationError::invalid_type(spec.name()));
                continue;
            };

            let mut passed = true;
            for rule in spec.rules() {
                if !rule.check(&coerced) {
                    passed = false;
                    errors.push(FieldValidationError::rule(
                        spec.name(),
                        rule.name(),
                        rule.message(),
                    ));
                }
            }

            if passed {
                cleaned.insert(spec.name(), coerced);
            }
        }

        if errors.is_empty() {
            ValidationResult::Valid { cleaned }
        } else {
            ValidationResult::Invalid { errors }
        }
    }
}

/// Loose presence: absent, null and the empty string all count as missing
fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
