//! Registry mapping validator names to definitions

use crate::core::error::ConfigError;
use crate::core::validation::ValidatorDefinition;
use std::collections::HashMap;
use std::sync::Arc;

/// Explicit name → definition table, built once at startup
///
/// Cloning is cheap (definitions are shared), so the registry can be used
/// directly as axum state or extracted from it with `FromRef`.
///
/// # Example
///
/// ```rust,ignore
/// let registry = ValidatorRegistry::new()
///     .with(define_validator!("create_invoice", { number: String [required] })?)?
///     .with(define_validator!("update_invoice", { number: String [] })?)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidatorRegistry {
    definitions: HashMap<String, Arc<ValidatorDefinition>>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition under its own name
    pub fn register(&mut self, definition: ValidatorDefinition) -> Result<(), ConfigError> {
        let name = definition.name().to_string();
        if self.definitions.contains_key(&name) {
            return Err(ConfigError::DuplicateValidator { name });
        }
        self.definitions.insert(name, Arc::new(definition));
        Ok(())
    }

    /// Builder form of [`register`](Self::register)
    pub fn with(mut self, definition: ValidatorDefinition) -> Result<Self, ConfigError> {
        self.register(definition)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&ValidatorDefinition> {
        self.definitions.get(name).map(Arc::as_ref)
    }

    /// Look a definition up, failing with `UnknownValidator`
    pub fn resolve(&self, name: &str) -> Result<&ValidatorDefinition, ConfigError> {
        self.get(name).ok_or_else(|| ConfigError::UnknownValidator {
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
