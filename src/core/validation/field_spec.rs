//! Declaration of a single input field

use super::rule::{Filter, Rule};
use crate::core::field::FieldType;

/// Declarative rule set for one named input field
///
/// # Example
///
/// ```rust,ignore
/// let spec = FieldSpec::new("amount", FieldType::Float)
///     .required()
///     .filter(filters::round_decimals(2))
///     .rule(validators::positive());
/// ```
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    field_type: FieldType,
    required: bool,
    rules: Vec<Rule>,
    filters: Vec<Filter>,
}

impl FieldSpec {
    /// Create an optional field with no rules
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            rules: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as optional (the default)
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Append a rule; rules run in the order they were added
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append a filter; filters run in the order they were added
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }
}
