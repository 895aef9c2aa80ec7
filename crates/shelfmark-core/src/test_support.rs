//! Mock collaborators shared by the core unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use shelfmark_contracts::{
    action::{ActionParams, PublicationStatus},
    capability::{Capability, Resource},
    error::{ShelfmarkError, ShelfmarkResult},
    item::{Collection, CollectionId, Item, ItemId, Principal, Selection},
};

use crate::traits::{BulkMutator, CapabilityChecker, CollectionResolver, ItemSetResolver, ParamsValidator};

pub fn principal() -> Principal {
    Principal::new("editor@example.edu").with_group("editors")
}

/// A checker backed by an explicit (capability, resource id) grant set.
///
/// Every call is recorded so tests can assert which checks ran.
#[derive(Default)]
pub struct MockChecker {
    grants: HashSet<(Capability, String)>,
    pub calls: Arc<Mutex<Vec<(Capability, String)>>>,
}

impl MockChecker {
    pub fn grant(mut self, capability: Capability, resource_id: &str) -> Self {
        self.grants.insert((capability, resource_id.to_string()));
        self
    }

    /// Grant `capabilities` on every id in `resource_ids`.
    pub fn grant_all(mut self, capabilities: &[Capability], resource_ids: &[&str]) -> Self {
        for cap in capabilities {
            for id in resource_ids {
                self.grants.insert((*cap, id.to_string()));
            }
        }
        self
    }

    pub fn call_count(&self, capability: Capability) -> usize {
        self.calls.lock().unwrap().iter().filter(|(c, _)| *c == capability).count()
    }
}

impl CapabilityChecker for MockChecker {
    fn can(&self, _principal: &Principal, capability: Capability, resource: Resource<'_>) -> bool {
        let id = resource.id().to_string();
        self.calls.lock().unwrap().push((capability, id.clone()));
        self.grants.contains(&(capability, id))
    }
}

impl CapabilityChecker for Arc<MockChecker> {
    fn can(&self, principal: &Principal, capability: Capability, resource: Resource<'_>) -> bool {
        self.as_ref().can(principal, capability, resource)
    }
}

/// An item store keyed by id, with a fixed bookmark list.
#[derive(Default)]
pub struct MockItems {
    items: HashMap<ItemId, Item>,
    bookmarks: Vec<ItemId>,
    pub fail: bool,
}

impl MockItems {
    /// Store items titled "Title <id>" and bookmark them in order.
    pub fn with_items(ids: &[&str]) -> Self {
        let mut store = Self::default();
        for id in ids {
            let item = Item::new(*id, format!("Title {}", id));
            store.bookmarks.push(item.id.clone());
            store.items.insert(item.id.clone(), item);
        }
        store
    }

    /// Resolve `alias` to an item stored under `canonical`.
    pub fn with_alias(mut self, alias: &str, canonical: &str) -> Self {
        let item = Item::new(canonical, format!("Title {}", canonical));
        self.bookmarks.push(ItemId::new(alias));
        self.items.insert(ItemId::new(alias), item);
        self
    }

    /// Bookmark an id that has no stored item.
    pub fn with_dangling_bookmark(mut self, id: &str) -> Self {
        self.bookmarks.push(ItemId::new(id));
        self
    }
}

impl ItemSetResolver for MockItems {
    fn selection(&self, _principal: &Principal) -> ShelfmarkResult<Selection> {
        Ok(Selection::new(self.bookmarks.iter().cloned()))
    }

    fn resolve(&self, id: &ItemId) -> ShelfmarkResult<Option<Item>> {
        if self.fail {
            return Err(ShelfmarkError::ResolverFailed {
                reason: "index unavailable".to_string(),
            });
        }
        Ok(self.items.get(id).cloned())
    }
}

#[derive(Default)]
pub struct MockCollections {
    collections: Vec<Collection>,
}

impl MockCollections {
    pub fn with(mut self, id: &str, name: &str) -> Self {
        self.collections.push(Collection::new(id, name));
        self
    }
}

impl CollectionResolver for MockCollections {
    fn resolve_collection(&self, id: &CollectionId) -> ShelfmarkResult<Option<Collection>> {
        Ok(self.collections.iter().find(|c| &c.id == id).cloned())
    }
}

/// One recorded call to the mock mutator.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationCall {
    pub method: &'static str,
    pub ids: Vec<ItemId>,
    pub params: ActionParams,
    pub detail: Option<String>,
}

/// A mutator that records every call and can be told to fail.
#[derive(Default)]
pub struct RecordingMutator {
    pub calls: Arc<Mutex<Vec<MutationCall>>>,
    pub fail: bool,
}

impl RecordingMutator {
    fn record(
        &self,
        method: &'static str,
        ids: &[ItemId],
        params: &ActionParams,
        detail: Option<String>,
    ) -> ShelfmarkResult<()> {
        if self.fail {
            return Err(ShelfmarkError::MutationFailed {
                action: method.to_string(),
                reason: "storage offline".to_string(),
            });
        }
        self.calls.lock().unwrap().push(MutationCall {
            method,
            ids: ids.to_vec(),
            params: params.clone(),
            detail,
        });
        Ok(())
    }
}

impl BulkMutator for RecordingMutator {
    fn apply_access_control(&self, ids: &[ItemId], params: &ActionParams) -> ShelfmarkResult<()> {
        self.record("access_control", ids, params, None)
    }

    fn apply_status_change(
        &self,
        ids: &[ItemId],
        status: PublicationStatus,
        actor: &Principal,
        params: &ActionParams,
    ) -> ShelfmarkResult<()> {
        self.record("status", ids, params, Some(format!("{:?} by {}", status, actor.user_key)))
    }

    fn apply_delete(&self, ids: &[ItemId], params: &ActionParams) -> ShelfmarkResult<()> {
        self.record("delete", ids, params, None)
    }

    fn apply_move(&self, ids: &[ItemId], target: &Collection, params: &ActionParams) -> ShelfmarkResult<()> {
        self.record("move", ids, params, Some(target.id.to_string()))
    }
}

/// Rejects every invocation of the named action.
pub struct RejectingValidator {
    pub action: &'static str,
}

impl ParamsValidator for RejectingValidator {
    fn validate(&self, action: &str, _params: &ActionParams) -> ShelfmarkResult<()> {
        if action == self.action {
            return Err(ShelfmarkError::InvalidParams {
                action: action.to_string(),
                reason: "rejected by test validator".to_string(),
            });
        }
        Ok(())
    }
}
