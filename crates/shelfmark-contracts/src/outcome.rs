//! Dispatch outcome and report types.
//!
//! `DispatchOutcome` is what the dispatcher returns for one bulk action.
//! It holds structured `(subject, reason)` pairs only; human-readable text is
//! assembled later by the reporter into a `FormattedOutcome`.

use serde::{Deserialize, Serialize};

use crate::{
    action::BulkOperation,
    capability::Capability,
    item::{Collection, CollectionId, Item, ItemId},
};

/// Why an item (or the whole batch) was left out of the bulk mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DenialReason {
    /// The principal lacks `capability` on the item.
    PermissionDenied { capability: Capability },

    /// The selected id no longer resolves to an item.
    TargetNotFound,

    /// A whole-batch precondition failed; no item was checked.
    ///
    /// `collection_name` is absent when the target collection itself could
    /// not be found.
    PreconditionFailed {
        collection_id: CollectionId,
        collection_name: Option<String>,
    },
}

/// What a denial refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DenialSubject {
    /// A single selected item. `title` is absent when the id did not resolve.
    Item { id: ItemId, title: Option<String> },
    /// The batch as a whole.
    Batch,
}

/// One entry in the ordered denial list of a `DispatchOutcome`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denial {
    pub subject: DenialSubject,
    pub reason: DenialReason,
}

impl Denial {
    pub fn permission_denied(item: &Item, capability: Capability) -> Self {
        Self {
            subject: DenialSubject::Item {
                id: item.id.clone(),
                title: Some(item.title.clone()),
            },
            reason: DenialReason::PermissionDenied { capability },
        }
    }

    /// Re-key an item denial to `id`. Batch denials are returned unchanged.
    pub fn with_item_id(mut self, id: &ItemId) -> Self {
        if let DenialSubject::Item { id: subject_id, .. } = &mut self.subject {
            *subject_id = id.clone();
        }
        self
    }

    pub fn not_found(id: &ItemId) -> Self {
        Self {
            subject: DenialSubject::Item {
                id: id.clone(),
                title: None,
            },
            reason: DenialReason::TargetNotFound,
        }
    }

    pub fn precondition_failed(collection_id: CollectionId, collection_name: Option<String>) -> Self {
        Self {
            subject: DenialSubject::Batch,
            reason: DenialReason::PreconditionFailed {
                collection_id,
                collection_name,
            },
        }
    }

    /// The item this denial names, `None` for batch denials.
    pub fn item_id(&self) -> Option<&ItemId> {
        match &self.subject {
            DenialSubject::Item { id, .. } => Some(id),
            DenialSubject::Batch => None,
        }
    }
}

/// The structured result of one bulk action invocation.
///
/// Outside the move precondition short-circuit, `success_ids` and the item
/// ids in `denials` partition the input selection, both in selection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    /// The operation that was dispatched.
    pub operation: BulkOperation,
    /// The move target, when one was resolved.
    pub target: Option<Collection>,
    /// Items handed to the bulk mutation, in selection order.
    pub success_ids: Vec<ItemId>,
    /// Items (or the batch) left out, in selection order.
    pub denials: Vec<Denial>,
}

impl DispatchOutcome {
    pub fn new(operation: BulkOperation) -> Self {
        Self {
            operation,
            target: None,
            success_ids: Vec::new(),
            denials: Vec::new(),
        }
    }

    /// True when a batch precondition stopped the action before partitioning.
    pub fn is_precondition_failure(&self) -> bool {
        self.denials
            .iter()
            .any(|d| matches!(d.reason, DenialReason::PreconditionFailed { .. }))
    }
}

/// The user-facing messages derived from a `DispatchOutcome`.
///
/// Either message is absent when there is nothing to say; there is never a
/// zero-count message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedOutcome {
    pub success_message: Option<String>,
    pub denial_message: Option<String>,
}
