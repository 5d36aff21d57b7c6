//! Named field rules and filters

use crate::core::field::FieldValue;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type Predicate = Arc<dyn Fn(&FieldValue) -> bool + Send + Sync>;
type Transform = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// A named predicate over a coerced field value
///
/// When the predicate returns `false` the rule's message is reported for the
/// field.
#[derive(Clone)]
pub struct Rule {
    name: String,
    message: String,
    predicate: Predicate,
}

impl Rule {
    pub fn new(
        name: impl Into<String>,
        message: impl Into<String>,
        predicate: impl Fn(&FieldValue) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Replace the reported message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn check(&self, value: &FieldValue) -> bool {
        (self.predicate)(value)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// A named normalizer applied to the raw value before presence checks
#[derive(Clone)]
pub struct Filter {
    name: String,
    transform: Transform,
}

impl Filter {
    pub fn new(
        name: impl Into<String>,
        transform: impl Fn(Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            transform: Arc::new(transform),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, value: Value) -> Value {
        (self.transform)(value)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_check_and_message() {
        let rule = Rule::new("even", "must be even", |v| {
            v.as_integer().is_some_and(|i| i % 2 == 0)
        });
        assert!(rule.check(&FieldValue::Integer(4)));
        assert!(!rule.check(&FieldValue::Integer(3)));
        assert_eq!(rule.name(), "even");
        assert_eq!(rule.message(), "must be even");
    }

    #[test]
    fn test_rule_with_message_overrides() {
        let rule = Rule::new("any", "default", |_| true).with_message("custom");
        assert_eq!(rule.message(), "custom");
        assert_eq!(rule.name(), "any");
    }

    #[test]
    fn test_filter_apply() {
        let filter = Filter::new("double", |v| match v.as_i64() {
            Some(i) => json!(i * 2),
            None => v,
        });
        assert_eq!(filter.apply(json!(21)), json!(42));
        assert_eq!(filter.apply(json!("x")), json!("x"));
    }

    #[test]
    fn test_debug_hides_closures() {
        let rule = Rule::new("any", "msg", |_| true);
        assert!(format!("{:?}", rule).contains("any"));
    }
}
