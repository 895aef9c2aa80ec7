//! TOML-driven capability checker.
//!
//! `TomlCapabilityChecker` loads a `PolicyConfig` from a TOML string or file
//! and implements the `CapabilityChecker` trait from shelfmark-core.
//!
//! Evaluation algorithm:
//!
//! 1. Iterate rules in declaration order.
//! 2. The first rule whose principal, capability and resource patterns all
//!    match decides: `allow` grants, `deny` refuses.
//! 3. If no rule matched → deny (deny-by-default policy).

use std::path::Path;

use tracing::debug;

use shelfmark_contracts::{
    capability::{Capability, Resource},
    error::{ShelfmarkError, ShelfmarkResult},
    item::Principal,
};
use shelfmark_core::traits::CapabilityChecker;

use crate::rule::{PolicyConfig, RuleEffect};

/// The decision for one capability question, with the rule that made it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    Allow { rule_id: String },
    Deny { reason: String },
}

impl PolicyDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, PolicyDecision::Allow { .. })
    }
}

/// A `CapabilityChecker` implementation that reads rules from a TOML document.
///
/// ```rust,ignore
/// use shelfmark_policy::engine::TomlCapabilityChecker;
///
/// let checker = TomlCapabilityChecker::from_file(Path::new("policies/repository.toml"))?;
/// ```
#[derive(Debug)]
pub struct TomlCapabilityChecker {
    config: PolicyConfig,
}

impl TomlCapabilityChecker {
    /// Build a checker from an already-parsed configuration.
    ///
    /// Returns `ShelfmarkError::ConfigError` if any rule pattern is invalid.
    pub fn from_config(config: PolicyConfig) -> ShelfmarkResult<Self> {
        for rule in &config.rules {
            rule.validate()
                .map_err(|reason| ShelfmarkError::ConfigError { reason })?;
        }
        Ok(Self { config })
    }

    /// Parse `s` as TOML and build a `TomlCapabilityChecker`.
    ///
    /// Returns `ShelfmarkError::ConfigError` if the TOML is malformed, does
    /// not match the `PolicyConfig` schema, or names an unknown capability.
    pub fn from_toml_str(s: &str) -> ShelfmarkResult<Self> {
        let config: PolicyConfig = toml::from_str(s).map_err(|e| ShelfmarkError::ConfigError {
            reason: format!("failed to parse policy TOML: {}", e),
        })?;
        Self::from_config(config)
    }

    /// Read the file at `path` and parse it as TOML policy configuration.
    pub fn from_file(path: &Path) -> ShelfmarkResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ShelfmarkError::ConfigError {
            reason: format!("failed to read policy file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Decide `capability` for `principal` on `resource`, reporting which
    /// rule decided it.
    pub fn evaluate(
        &self,
        principal: &Principal,
        capability: Capability,
        resource: Resource<'_>,
    ) -> PolicyDecision {
        for rule in &self.config.rules {
            if !rule.matches(principal, capability, resource) {
                continue;
            }

            debug!(
                rule_id = %rule.id,
                principal = %principal.user_key,
                capability = %capability,
                resource_kind = resource.kind(),
                resource_id = %resource.id(),
                effect = ?rule.effect,
                "capability rule matched"
            );

            return match rule.effect {
                RuleEffect::Allow => PolicyDecision::Allow { rule_id: rule.id.clone() },
                RuleEffect::Deny => PolicyDecision::Deny {
                    reason: format!("denied by rule '{}'", rule.id),
                },
            };
        }

        debug!(
            principal = %principal.user_key,
            capability = %capability,
            resource_kind = resource.kind(),
            resource_id = %resource.id(),
            "no capability rule matched; denying by default"
        );

        PolicyDecision::Deny {
            reason: format!(
                "denied by default: no rule grants '{}' on {} '{}' to '{}'",
                capability,
                resource.kind(),
                resource.id(),
                principal.user_key
            ),
        }
    }
}

impl CapabilityChecker for TomlCapabilityChecker {
    fn can(&self, principal: &Principal, capability: Capability, resource: Resource<'_>) -> bool {
        self.evaluate(principal, capability, resource).is_allowed()
    }
}
