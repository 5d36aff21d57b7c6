//! Request-scoped memoization of validation results

use crate::core::validation::ValidationResult;
use std::collections::HashMap;
use std::sync::Arc;

/// Validation results of the current request, keyed by validator name
///
/// Lives exactly as long as one request. The axum extractors keep it in the
/// request extensions so every extractor of a handler shares it.
#[derive(Debug, Clone, Default)]
pub struct RequestCache {
    results: HashMap<String, Arc<ValidationResult>>,
}

impl RequestCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Arc<ValidationResult>> {
        self.results.get(name).cloned()
    }

    /// Store a result, returning the shared handle
    pub fn store(&mut self, name: impl Into<String>, result: ValidationResult) -> Arc<ValidationResult> {
        let result = Arc::new(result);
        self.results.insert(name.into(), Arc::clone(&result));
        result
    }

    pub fn contains(&self, name: &str) -> bool {
        self.results.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
