//! Parameter schema and rule types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What an action's parameters must look like.
///
/// Combines a JSON Schema document with rules that go beyond what JSON
/// Schema expresses comfortably.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamsSchema {
    /// JSON Schema for the parameter object. `null` means no structural
    /// constraint.
    pub json_schema: Value,
    /// Rules evaluated after structural validation.
    #[serde(default)]
    pub rules: Vec<ParamsRule>,
}

impl ParamsSchema {
    pub fn new(json_schema: Value) -> Self {
        Self {
            json_schema,
            rules: Vec::new(),
        }
    }

    pub fn with_rule(mut self, rule: ParamsRule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// A single semantic rule applied to action parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamsRule {
    /// Referenced in failure messages.
    pub rule_id: String,
    pub rule_type: ParamsRuleType,
}

impl ParamsRule {
    pub fn new(rule_id: impl Into<String>, rule_type: ParamsRuleType) -> Self {
        Self {
            rule_id: rule_id.into(),
            rule_type,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ParamsRuleType {
    /// The key must be present, non-null and, for strings, non-blank.
    RequiredField { field: String },

    /// When present, the key must equal one of `allowed`.
    AllowedValues { field: String, allowed: Vec<Value> },

    /// Delegate to a function registered with
    /// `SchemaParamsValidator::register_rule`.
    Custom { function_name: String },
}
