//! Configuration loading for validator definitions
//!
//! Validators can be declared in YAML instead of code and loaded into a
//! [`ValidatorRegistry`] at startup:
//!
//! ```yaml
//! validators:
//!   - name: create_fancy_resource
//!     fields:
//!       - name: user_id
//!         type: integer
//!         required: true
//!       - name: fancy_name
//!         type: string
//!         required: true
//!         filters:
//!           - filter: trim
//!         rules:
//!           - rule: string_length
//!             min: 3
//!             max: 50
//! ```

use crate::binding::ValidatorRegistry;
use crate::core::error::ConfigError;
use crate::core::field::{FieldFormat, FieldType};
use crate::core::validation::{
    FieldSpec, Filter, Rule, ValidatorDefinition, filters, validators,
};
use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Complete configuration: a list of validators
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParamsConfig {
    #[serde(default)]
    pub validators: Vec<ValidatorConfig>,
}

/// One validator (one request/action)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    pub name: String,

    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

/// One declared input field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default)]
    pub required: bool,

    /// Applied in order before presence checks
    #[serde(default)]
    pub filters: Vec<FilterConfig>,

    /// Checked in order once the value is coerced
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// Named filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "filter", rename_all = "snake_case")]
pub enum FilterConfig {
    Trim,
    Uppercase,
    Lowercase,
    RoundDecimals { decimals: u32 },
}

/// Named rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleConfig {
    StringLength { min: usize, max: usize },
    Positive,
    MinValue { min: f64 },
    MaxValue { max: f64 },
    InList { values: Vec<String> },
    DateFormat { format: String },
    Format { format: FormatConfig },
    Pattern { regex: String },
}

/// Built-in string formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatConfig {
    Email,
    Url,
    Uuid,
    Phone,
}

impl ParamsConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.to_string(),
            },
            _ => ConfigError::from(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Concatenate several configurations
    ///
    /// Name clashes are reported when the registry is built, not here.
    pub fn merge(configs: Vec<ParamsConfig>) -> Self {
        Self {
            validators: configs.into_iter().flat_map(|c| c.validators).collect(),
        }
    }

    /// Turn every declared validator into a definition and register it
    pub fn build_registry(&self) -> Result<ValidatorRegistry, ConfigError> {
        let mut registry = ValidatorRegistry::new();
        for validator in &self.validators {
            registry.register(validator.to_definition()?)?;
        }

        tracing::info!(validators = registry.len(), "params registry loaded");
        Ok(registry)
    }
}

impl ValidatorConfig {
    pub fn to_definition(&self) -> Result<ValidatorDefinition, ConfigError> {
        let fields = self
            .fields
            .iter()
            .map(|field| field.to_spec(&self.name))
            .collect::<Result<Vec<_>, _>>()?;

        ValidatorDefinition::define(&self.name, fields)
    }
}

impl FieldConfig {
    fn to_spec(&self, validator: &str) -> Result<FieldSpec, ConfigError> {
        let mut spec = FieldSpec::new(&self.name, self.field_type);
        if self.required {
            spec = spec.required();
        }

        for filter in &self.filters {
            spec = spec.filter(filter.to_filter());
        }

        for rule in &self.rules {
            let rule = rule.to_rule().map_err(|message| ConfigError::InvalidValue {
                field: format!("{}.{}", validator, self.name),
                value: rule.name().to_string(),
                message,
            })?;
            spec = spec.rule(rule);
        }

        Ok(spec)
    }
}

impl FilterConfig {
    pub fn to_filter(&self) -> Filter {
        match self {
            FilterConfig::Trim => filters::trim(),
            FilterConfig::Uppercase => filters::uppercase(),
            FilterConfig::Lowercase => filters::lowercase(),
            FilterConfig::RoundDecimals { decimals } => filters::round_decimals(*decimals),
        }
    }
}

impl RuleConfig {
    pub fn name(&self) -> &'static str {
        match self {
            RuleConfig::StringLength { .. } => "string_length",
            RuleConfig::Positive => "positive",
            RuleConfig::MinValue { .. } => "min_value",
            RuleConfig::MaxValue { .. } => "max_value",
            RuleConfig::InList { .. } => "in_list",
            RuleConfig::DateFormat { .. } => "date_format",
            RuleConfig::Format { .. } => "format",
            RuleConfig::Pattern { .. } => "pattern",
        }
    }

    /// Build the rule; the error is a human-readable reason
    pub fn to_rule(&self) -> Result<Rule, String> {
        let rule = match self {
            RuleConfig::StringLength { min, max } => {
                if min > max {
                    return Err(format!("min ({}) is greater than max ({})", min, max));
                }
                validators::string_length(*min, *max)
            }
            RuleConfig::Positive => validators::positive(),
            RuleConfig::MinValue { min } => validators::min_value(*min),
            RuleConfig::MaxValue { max } => validators::max_value(*max),
            RuleConfig::InList { values } => validators::in_list(values.clone()),
            RuleConfig::DateFormat { format } => validators::date_format(format.clone()),
            RuleConfig::Format { format } => validators::format(match format {
                FormatConfig::Email => FieldFormat::Email,
                FormatConfig::Url => FieldFormat::Url,
                FormatConfig::Uuid => FieldFormat::Uuid,
                FormatConfig::Phone => FieldFormat::Phone,
            }),
            RuleConfig::Pattern { regex } => {
                let regex = Regex::new(regex).map_err(|e| e.to_string())?;
                validators::pattern(regex)
            }
        };
        Ok(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const YAML: &str = r#"
validators:
  - name: create_fancy_resource
    fields:
      - name: user_id
        type: integer
        required: true
      - name: fancy_name
        type: string
        required: true
        filters:
          - filter: trim
        rules:
          - rule: string_length
            min: 3
            max: 50
  - name: update_contact
    fields:
      - name: email
        type: string
        rules:
          - rule: format
            format: email
      - name: score
        type: float
        filters:
          - filter: round_decimals
            decimals: 1
        rules:
          - rule: min_value
            min: 0
          - rule: max_value
            max: 10
"#;

    #[test]
    fn test_yaml_parsing() {
        let config = ParamsConfig::from_yaml_str(YAML).unwrap();
        assert_eq!(config.validators.len(), 2);

        let fancy = &config.validators[0];
        assert_eq!(fancy.fields[0].field_type, FieldType::Integer);
        assert!(fancy.fields[0].required);
        assert_eq!(fancy.fields[1].filters, vec![FilterConfig::Trim]);
        assert_eq!(
            fancy.fields[1].rules,
            vec![RuleConfig::StringLength { min: 3, max: 50 }]
        );
    }

    #[test]
    fn test_build_registry_validates() {
        let registry = ParamsConfig::from_yaml_str(YAML)
            .unwrap()
            .build_registry()
            .unwrap();
        assert_eq!(registry.names(), vec!["create_fancy_resource", "update_contact"]);

        let contact = registry.resolve("update_contact").unwrap();
        let raw = json!({ "email": "nope", "score": 12.34 });
        let result = contact.validate(raw.as_object().unwrap());
        let messages: Vec<&str> = result.errors().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["invalid email", "must not exceed 10"]);
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let yaml = r#"
validators:
  - name: bad
    fields:
      - name: code
        type: string
        rules:
          - rule: pattern
            regex: "(["
"#;
        let err = ParamsConfig::from_yaml_str(yaml)
            .unwrap()
            .build_registry()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "bad.code"));
    }

    #[test]
    fn test_inverted_length_bounds_rejected() {
        let rule = RuleConfig::StringLength { min: 5, max: 1 };
        assert!(rule.to_rule().is_err());
    }

    #[test]
    fn test_unknown_rule_fails_to_parse() {
        let yaml = r#"
validators:
  - name: bad
    fields:
      - name: code
        type: string
        rules:
          - rule: shiny
"#;
        let err = ParamsConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::ParseError { file: None, .. })
        ));
    }

    #[test]
    fn test_merge_then_duplicate_is_reported() {
        let a = ParamsConfig::from_yaml_str(YAML).unwrap();
        let b = ParamsConfig::from_yaml_str(YAML).unwrap();
        let merged = ParamsConfig::merge(vec![a, b]);
        assert_eq!(merged.validators.len(), 4);
        assert!(matches!(
            merged.build_registry().unwrap_err(),
            ConfigError::DuplicateValidator { .. }
        ));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = ParamsConfig::from_yaml_str(YAML).unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = ParamsConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed.validators.len(), config.validators.len());
    }
}
