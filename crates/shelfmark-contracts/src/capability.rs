//! Capability and resource types.
//!
//! A capability is a named permission evaluated per (principal, resource)
//! pair. The capability checker is authoritative: the dispatcher asks, it
//! never second-guesses the answer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::item::{Collection, HasIdentifier, Item};

/// The capabilities bulk actions are gated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Read,
    Update,
    Destroy,
    Unpublish,
    UpdateAccessControl,
}

impl Capability {
    /// Every capability, in a stable order.
    pub const ALL: [Capability; 5] = [
        Capability::Read,
        Capability::Update,
        Capability::Destroy,
        Capability::Unpublish,
        Capability::UpdateAccessControl,
    ];

    /// The wire name used in policy files and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Read => "read",
            Capability::Update => "update",
            Capability::Destroy => "destroy",
            Capability::Unpublish => "unpublish",
            Capability::UpdateAccessControl => "update_access_control",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown capability '{}'", s))
    }
}

/// The thing a capability is checked against.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    Item(&'a Item),
    Collection(&'a Collection),
}

impl Resource<'_> {
    /// `"item"` or `"collection"`, as used in policy resource patterns.
    pub fn kind(&self) -> &'static str {
        match self {
            Resource::Item(_) => "item",
            Resource::Collection(_) => "collection",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Resource::Item(item) => HasIdentifier::id(*item),
            Resource::Collection(collection) => HasIdentifier::id(*collection),
        }
    }
}
