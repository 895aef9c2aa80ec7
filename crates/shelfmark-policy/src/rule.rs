//! Capability rule types and configuration schema.
//!
//! A `PolicyConfig` is deserialized from TOML and holds an ordered list of
//! `PolicyRule`s. Rules are evaluated in declaration order; the first
//! matching rule wins. If no rule matches, the checker denies by default.

use serde::{Deserialize, Serialize};

use shelfmark_contracts::{
    capability::{Capability, Resource},
    item::Principal,
};

/// What a matching rule decides.
///
/// Example in TOML:
/// ```toml
/// effect = "allow"
/// effect = "deny"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleEffect {
    Allow,
    Deny,
}

/// A single capability rule loaded from TOML.
///
/// Patterns:
/// - `principals`: `"*"`, `"user:<user_key>"` or `"group:<name>"`
/// - `capabilities`: capability names (`"update"`, `"destroy"`, …) or `"*"`
/// - `resource`: `"*"`, `"item:*"`, `"item:<id>"`, `"collection:*"` or
///   `"collection:<id>"`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyRule {
    /// Stable identifier used in log lines.
    pub id: String,

    /// Human-readable explanation of what this rule controls.
    pub description: String,

    /// Who the rule applies to. Defaults to everyone.
    #[serde(default = "any")]
    pub principals: Vec<String>,

    /// Which capabilities the rule decides.
    pub capabilities: Vec<String>,

    /// Which resources the rule covers.
    pub resource: String,

    /// Restrict an item rule to items currently in this collection.
    ///
    /// Items outside any collection never match a rule that sets this.
    #[serde(default)]
    pub in_collection: Option<String>,

    pub effect: RuleEffect,
}

fn any() -> Vec<String> {
    vec!["*".to_string()]
}

impl PolicyRule {
    /// Check the rule's patterns for typos. Returns a description of the
    /// first problem found.
    pub fn validate(&self) -> Result<(), String> {
        for pattern in &self.principals {
            let valid = pattern == "*"
                || pattern.strip_prefix("user:").is_some_and(|s| !s.is_empty())
                || pattern.strip_prefix("group:").is_some_and(|s| !s.is_empty());
            if !valid {
                return Err(format!("rule '{}': invalid principal pattern '{}'", self.id, pattern));
            }
        }

        if self.capabilities.is_empty() {
            return Err(format!("rule '{}': no capabilities listed", self.id));
        }
        for name in &self.capabilities {
            if name != "*" {
                name.parse::<Capability>()
                    .map_err(|e| format!("rule '{}': {}", self.id, e))?;
            }
        }

        let resource_ok = self.resource == "*"
            || self.resource.strip_prefix("item:").is_some_and(|s| !s.is_empty())
            || self.resource.strip_prefix("collection:").is_some_and(|s| !s.is_empty());
        if !resource_ok {
            return Err(format!("rule '{}': invalid resource pattern '{}'", self.id, self.resource));
        }

        if self.in_collection.is_some() && self.resource.starts_with("collection:") {
            return Err(format!(
                "rule '{}': in_collection only applies to item resources",
                self.id
            ));
        }

        Ok(())
    }

    /// Return true if this rule decides `capability` for `principal` on
    /// `resource`.
    pub fn matches(&self, principal: &Principal, capability: Capability, resource: Resource<'_>) -> bool {
        self.matches_principal(principal)
            && self.matches_capability(capability)
            && self.matches_resource(resource)
    }

    fn matches_principal(&self, principal: &Principal) -> bool {
        self.principals.iter().any(|pattern| {
            if pattern == "*" {
                return true;
            }
            if let Some(user) = pattern.strip_prefix("user:") {
                return user == principal.user_key;
            }
            pattern
                .strip_prefix("group:")
                .is_some_and(|group| principal.in_group(group))
        })
    }

    fn matches_capability(&self, capability: Capability) -> bool {
        self.capabilities
            .iter()
            .any(|name| name == "*" || name == capability.as_str())
    }

    fn matches_resource(&self, resource: Resource<'_>) -> bool {
        let pattern_ok = match self.resource.split_once(':') {
            None => self.resource == "*",
            Some((kind, id)) => kind == resource.kind() && (id == "*" || id == resource.id()),
        };
        if !pattern_ok {
            return false;
        }

        match (&self.in_collection, resource) {
            (None, _) => true,
            (Some(wanted), Resource::Item(item)) => item
                .collection
                .as_ref()
                .is_some_and(|c| c.as_str() == wanted),
            (Some(_), Resource::Collection(_)) => false,
        }
    }
}

/// The top-level structure deserialized from a TOML policy file.
///
/// Example:
/// ```toml
/// [[rules]]
/// id = "editors-update-items"
/// description = "Editors may update any item"
/// principals = ["group:editors"]
/// capabilities = ["update"]
/// resource = "item:*"
/// effect = "allow"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Ordered list of rules. First match wins.
    #[serde(default)]
    pub rules: Vec<PolicyRule>,
}
