//! Bulk operation, display mode and action parameter types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    capability::Capability,
    error::{ShelfmarkError, ShelfmarkResult},
    item::CollectionId,
};

/// How the host UI presents an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// The action needs a confirmation form before it is invoked.
    Form,
    /// The action is invoked immediately from the toolbar.
    Formless,
}

/// Export formats inherited from the base bookmark catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Email,
    Citation,
}

/// Publication states a status change can move items into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    Published,
    Unpublished,
}

/// The handler an action descriptor is bound to.
///
/// Each operation fixes the capabilities an item must hold to be included in
/// the bulk mutation. The permission filter and the dispatcher both read
/// them from here so the two can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkOperation {
    UpdateAccessControl,
    Publish,
    Unpublish,
    Delete,
    Move,
    Export(ExportFormat),
}

impl BulkOperation {
    /// Capabilities every item must hold, checked in this order.
    ///
    /// `Publish` is gated on `update` alone; there is no separate publish
    /// capability. `Unpublish` needs both `update` and `unpublish`.
    pub fn required_capabilities(&self) -> &'static [Capability] {
        match self {
            BulkOperation::UpdateAccessControl => &[Capability::UpdateAccessControl],
            BulkOperation::Publish => &[Capability::Update],
            BulkOperation::Unpublish => &[Capability::Update, Capability::Unpublish],
            BulkOperation::Delete => &[Capability::Destroy],
            BulkOperation::Move => &[Capability::Update],
            BulkOperation::Export(_) => &[Capability::Read],
        }
    }

    /// False for operations this dispatcher has no mutation for.
    pub fn is_dispatchable(&self) -> bool {
        !matches!(self, BulkOperation::Export(_))
    }

    /// The status a status-change operation applies.
    pub fn target_status(&self) -> Option<PublicationStatus> {
        match self {
            BulkOperation::Publish => Some(PublicationStatus::Published),
            BulkOperation::Unpublish => Some(PublicationStatus::Unpublished),
            _ => None,
        }
    }
}

/// Caller-supplied parameters for one action invocation.
///
/// Always a JSON object. Keys the dispatcher does not understand are passed
/// through to the mutator untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionParams(Map<String, Value>);

impl ActionParams {
    /// The parameter key naming a move target.
    pub const TARGET_COLLECTION: &'static str = "target_collection_id";
    /// The parameter key of the access-control hidden flag.
    pub const HIDDEN: &'static str = "hidden";

    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build params from an arbitrary JSON value; anything but an object or
    /// `null` is rejected.
    pub fn from_value(value: Value) -> ShelfmarkResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(ShelfmarkError::InvalidParams {
                action: String::new(),
                reason: format!("action parameters must be a JSON object, got {}", other),
            }),
        }
    }

    /// Set `key` to `value`, builder-style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The parameters as a JSON value, for schema validation.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// The move target, if present and non-empty.
    pub fn target_collection_id(&self) -> Option<CollectionId> {
        self.0
            .get(Self::TARGET_COLLECTION)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(CollectionId::new)
    }

    pub fn hidden(&self) -> Option<bool> {
        self.0.get(Self::HIDDEN).and_then(Value::as_bool)
    }

    /// Coerce a string `hidden` flag into a boolean.
    ///
    /// Form posts deliver the flag as text: exactly `"true"` means hidden,
    /// any other non-blank string means visible. Absent and blank flags are
    /// left untouched, so they never change an item's visibility.
    pub fn normalize_hidden(&mut self) {
        if let Some(Value::String(raw)) = self.0.get(Self::HIDDEN) {
            if raw.trim().is_empty() {
                return;
            }
            let hidden = raw == "true";
            self.0.insert(Self::HIDDEN.to_string(), Value::Bool(hidden));
        }
    }
}

/// Identifier attached to every log line of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DispatchId(pub uuid::Uuid);

impl DispatchId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for DispatchId {
    fn default() -> Self {
        Self::new()
    }
}
