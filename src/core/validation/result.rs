//! Outcome of one validation run

use crate::core::error::FieldValidationError;
use crate::core::field::FieldValue;
use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Untrusted key-value data arriving with a request
pub type RawInput = serde_json::Map<String, serde_json::Value>;

/// Cleaned parameters: only declared fields, coerced to their declared type
///
/// Iterates in field-declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Params(IndexMap<String, FieldValue>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.0.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn string(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_string)
    }

    pub fn integer(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(FieldValue::as_integer)
    }

    pub fn float(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_float)
    }

    pub fn boolean(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(FieldValue::as_boolean)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build a domain object from the cleaned parameters
    ///
    /// ```rust,ignore
    /// #[derive(Deserialize)]
    /// struct NewFancy { user_id: i64, fancy_name: String }
    ///
    /// let fancy: NewFancy = params.deserialize()?;
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(serde_json::to_value(self)?)
    }

    pub fn into_inner(self) -> IndexMap<String, FieldValue> {
        self.0
    }
}

/// Result of validating raw input against a definition
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// Every check passed
    Valid { cleaned: Params },

    /// At least one field failed; errors are in field-declaration order
    Invalid { errors: Vec<FieldValidationError> },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid { .. })
    }

    pub fn cleaned(&self) -> Option<&Params> {
        match self {
            ValidationResult::Valid { cleaned } => Some(cleaned),
            ValidationResult::Invalid { .. } => None,
        }
    }

    /// Field errors, empty when valid
    pub fn errors(&self) -> &[FieldValidationError] {
        match self {
            ValidationResult::Valid { .. } => &[],
            ValidationResult::Invalid { errors } => errors,
        }
    }
}
