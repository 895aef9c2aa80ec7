//! Schema-based parameter validator for bulk actions.
//!
//! `SchemaParamsValidator` implements the `ParamsValidator` trait from
//! `shelfmark-core`. Validation runs in two phases:
//!
//! 1. **Structural**: the parameter object is validated against the action's
//!    compiled JSON Schema using the `jsonschema` crate.
//! 2. **Semantic**: each `ParamsRule` of the action is evaluated in order.
//!    All failures are collected before returning.
//!
//! Actions without a registered schema accept any parameters.

use std::collections::HashMap;

use serde_json::{json, Value};
use tracing::{debug, warn};

use shelfmark_contracts::{
    action::ActionParams,
    error::{ShelfmarkError, ShelfmarkResult},
};
use shelfmark_core::{registry, traits::ParamsValidator};

use crate::schema::{ParamsRule, ParamsRuleType, ParamsSchema};

/// A caller-supplied parameter check.
///
/// Returns `Some(message)` when the parameters are unacceptable, `None`
/// otherwise.
pub type CustomParamsFn = Box<dyn Fn(&ActionParams) -> Option<String> + Send + Sync>;

struct CompiledSchema {
    validator: Option<jsonschema::Validator>,
    rules: Vec<ParamsRule>,
}

/// Validates action parameters against per-action schemas.
pub struct SchemaParamsValidator {
    schemas: HashMap<String, CompiledSchema>,
    custom_rules: HashMap<String, CustomParamsFn>,
}

impl SchemaParamsValidator {
    /// A validator with no schemas: every action accepts any parameters.
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
            custom_rules: HashMap::new(),
        }
    }

    /// The schemas of the media repository catalog.
    pub fn repository_defaults() -> ShelfmarkResult<Self> {
        let mut validator = Self::new();

        validator.register_schema(
            registry::MOVE,
            ParamsSchema::new(json!({
                "type": "object",
                "required": ["target_collection_id"],
                "properties": {
                    "target_collection_id": { "type": "string", "minLength": 1 }
                }
            }))
            .with_rule(ParamsRule::new(
                "target-required",
                ParamsRuleType::RequiredField {
                    field: ActionParams::TARGET_COLLECTION.to_string(),
                },
            )),
        )?;

        let principal_list = json!({ "type": "array", "items": { "type": "string" } });
        validator.register_schema(
            registry::UPDATE_ACCESS_CONTROL,
            ParamsSchema::new(json!({
                "type": "object",
                "properties": {
                    "hidden": {
                        "anyOf": [
                            { "type": "boolean" },
                            { "type": "string", "enum": ["true", "false"] }
                        ]
                    },
                    "visibility": { "type": "string" },
                    "add_users": principal_list,
                    "remove_users": principal_list,
                    "add_groups": principal_list,
                    "remove_groups": principal_list,
                    "lease_begin_date": { "type": "string" },
                    "lease_end_date": { "type": "string" }
                }
            }))
            .with_rule(ParamsRule::new(
                "known-visibility",
                ParamsRuleType::AllowedValues {
                    field: "visibility".to_string(),
                    allowed: vec![json!("public"), json!("restricted"), json!("private")],
                },
            ))
            .with_rule(ParamsRule::new(
                "lease-order",
                ParamsRuleType::Custom {
                    function_name: "lease-dates-ordered".to_string(),
                },
            )),
        )?;
        validator.register_rule("lease-dates-ordered", Box::new(lease_dates_ordered));

        for action in [registry::PUBLISH, registry::UNPUBLISH, registry::DELETE] {
            validator.register_schema(action, ParamsSchema::new(json!({ "type": "object" })))?;
        }

        Ok(validator)
    }

    /// Compile and register the schema for `action`, replacing any previous one.
    ///
    /// Returns `ShelfmarkError::ConfigError` if the JSON Schema document does
    /// not compile.
    pub fn register_schema(&mut self, action: impl Into<String>, schema: ParamsSchema) -> ShelfmarkResult<()> {
        let action = action.into();
        let validator = if schema.json_schema.is_null() {
            None
        } else {
            let compiled = jsonschema::validator_for(&schema.json_schema).map_err(|e| {
                ShelfmarkError::ConfigError {
                    reason: format!("invalid parameter schema for '{}': {}", action, e),
                }
            })?;
            Some(compiled)
        };

        self.schemas.insert(
            action,
            CompiledSchema {
                validator,
                rules: schema.rules,
            },
        );
        Ok(())
    }

    /// Register a custom check under `name`. Registering the same name twice
    /// replaces the previous function.
    pub fn register_rule(&mut self, name: impl Into<String>, f: CustomParamsFn) {
        self.custom_rules.insert(name.into(), f);
    }

    /// Every failure for `params` under `action`'s schema, in evaluation order.
    pub fn failures(&self, action: &str, params: &ActionParams) -> Vec<String> {
        let Some(schema) = self.schemas.get(action) else {
            return Vec::new();
        };

        let mut failures = Vec::new();
        let instance = params.to_value();

        // ── Phase 1: JSON Schema structural validation ────────────────────────
        if let Some(validator) = &schema.validator {
            for error in validator.iter_errors(&instance) {
                let message = format!("schema violation at '{}': {}", error.instance_path, error);
                warn!(action = %action, %message, "structural parameter failure");
                failures.push(message);
            }
        }

        // ── Phase 2: Semantic rules ───────────────────────────────────────────
        for rule in &schema.rules {
            let failure = match &rule.rule_type {
                ParamsRuleType::RequiredField { field } => match params.get(field) {
                    None | Some(Value::Null) => Some(format!("'{}' is required", field)),
                    Some(Value::String(s)) if s.trim().is_empty() => {
                        Some(format!("'{}' must not be blank", field))
                    }
                    Some(_) => None,
                },

                ParamsRuleType::AllowedValues { field, allowed } => match params.get(field) {
                    None => None,
                    Some(actual) if allowed.contains(actual) => None,
                    Some(actual) => Some(format!("'{}' has value {} which is not allowed", field, actual)),
                },

                // An unregistered name is itself a failure so misconfigured
                // schemas surface immediately.
                ParamsRuleType::Custom { function_name } => match self.custom_rules.get(function_name) {
                    Some(f) => f(params),
                    None => Some(format!("no custom rule registered under '{}'", function_name)),
                },
            };

            if let Some(message) = failure {
                warn!(action = %action, rule_id = %rule.rule_id, %message, "parameter rule failed");
                failures.push(format!("[{}] {}", rule.rule_id, message));
            }
        }

        debug!(action = %action, failure_count = failures.len(), "parameters checked");
        failures
    }
}

impl Default for SchemaParamsValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamsValidator for SchemaParamsValidator {
    fn validate(&self, action: &str, params: &ActionParams) -> ShelfmarkResult<()> {
        let failures = self.failures(action, params);
        if failures.is_empty() {
            Ok(())
        } else {
            Err(ShelfmarkError::InvalidParams {
                action: action.to_string(),
                reason: failures.join("; "),
            })
        }
    }
}

/// Lease dates are ISO-8601 (`YYYY-MM-DD`), so string order is date order.
fn lease_dates_ordered(params: &ActionParams) -> Option<String> {
    let begin = params.get("lease_begin_date").and_then(Value::as_str)?;
    let end = params.get("lease_end_date").and_then(Value::as_str)?;
    if begin > end {
        Some(format!("lease begins ({}) after it ends ({})", begin, end))
    } else {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
