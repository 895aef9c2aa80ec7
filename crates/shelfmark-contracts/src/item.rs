//! Item, collection, principal and selection types.
//!
//! These are the values that flow between the host application's
//! persistence layer and the dispatcher. The dispatcher only ever refers to
//! items by identifier; it never owns or mutates them.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Anything that carries a stable string identifier.
///
/// Host applications implement this for their own record types so the
/// dispatcher can talk about them without knowing their shape.
pub trait HasIdentifier {
    /// The stable identifier of this value.
    fn id(&self) -> &str;
}

/// Opaque identifier of a repository item (e.g. a media object pid).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of a collection items can be moved into.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollectionId(pub String);

impl CollectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A live repository item as resolved at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier.
    pub id: ItemId,
    /// Display title used in denial messages.
    pub title: String,
    /// The collection the item currently lives in, if any.
    ///
    /// Capability policies may scope grants by collection.
    pub collection: Option<CollectionId>,
}

impl Item {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            title: title.into(),
            collection: None,
        }
    }

    /// Place the item in `collection`.
    pub fn in_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(CollectionId::new(collection));
        self
    }
}

impl HasIdentifier for Item {
    fn id(&self) -> &str {
        self.id.as_str()
    }
}

/// A collection, the target of a `move` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    /// Human-readable name used in move messages.
    pub name: String,
}

impl Collection {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: CollectionId::new(id),
            name: name.into(),
        }
    }
}

impl HasIdentifier for Collection {
    fn id(&self) -> &str {
        self.id.as_str()
    }
}

/// The acting user, passed explicitly into every entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable user key (e.g. a login or email address).
    pub user_key: String,
    /// Group or role names the user belongs to.
    #[serde(default)]
    pub groups: Vec<String>,
}

impl Principal {
    pub fn new(user_key: impl Into<String>) -> Self {
        Self {
            user_key: user_key.into(),
            groups: Vec::new(),
        }
    }

    /// Add a group membership.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}

/// An ordered snapshot of the item ids a principal has selected.
///
/// Built fresh for every request and never cached; the dispatcher resolves
/// each id to a live item again before authorizing it.
///
/// Deserialization goes through `Selection::new`, so a selection never
/// holds the same id twice whichever way it was built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    ids: Vec<ItemId>,
}

impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            ids: Vec<ItemId>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Selection::new(raw.ids))
    }
}

impl Selection {
    /// Build a selection, dropping repeated ids while keeping first-seen order.
    pub fn new(ids: impl IntoIterator<Item = ItemId>) -> Self {
        let mut seen: HashSet<ItemId> = HashSet::new();
        let ids = ids.into_iter().filter(|id| seen.insert(id.clone())).collect();
        Self { ids }
    }

    /// Convenience constructor from string ids.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ids.into_iter().map(ItemId::new))
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
