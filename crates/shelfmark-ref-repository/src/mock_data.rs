//! Simulated media repository for the shelfmark reference runtime.
//!
//! All data in this module is hardcoded and fictional. `InMemoryRepository`
//! stands in for the host application's item store, bookmark table and bulk
//! mutation routines. Clones share the same underlying state, so one
//! repository can be handed to the dispatcher as resolver and mutator while
//! the caller keeps a handle for inspection.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use tracing::{debug, info};

use shelfmark_contracts::{
    action::{ActionParams, PublicationStatus},
    error::{ShelfmarkError, ShelfmarkResult},
    item::{Collection, CollectionId, Item, ItemId, Principal, Selection},
};
use shelfmark_core::traits::{BulkMutator, CollectionResolver, ItemSetResolver};

// ── Stored records ────────────────────────────────────────────────────────────

/// One media object as the repository stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredItem {
    pub item: Item,
    pub published: bool,
    /// Last user to publish or unpublish the item.
    pub status_changed_by: Option<String>,
    pub hidden: bool,
    pub visibility: String,
    pub read_users: BTreeSet<String>,
    pub read_groups: BTreeSet<String>,
}

impl StoredItem {
    fn new(item: Item) -> Self {
        Self {
            item,
            published: false,
            status_changed_by: None,
            hidden: false,
            visibility: "private".to_string(),
            read_users: BTreeSet::new(),
            read_groups: BTreeSet::new(),
        }
    }
}

/// One call received by the bulk mutation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub method: String,
    pub ids: Vec<ItemId>,
}

#[derive(Debug, Default)]
struct RepositoryState {
    /// Insertion order is kept so listings are stable.
    items: Vec<StoredItem>,
    collections: Vec<Collection>,
    bookmarks: HashMap<String, Vec<ItemId>>,
    mutations: Vec<MutationRecord>,
    fail_mutations: bool,
}

impl RepositoryState {
    fn item_mut(&mut self, id: &ItemId) -> Option<&mut StoredItem> {
        self.items.iter_mut().find(|stored| &stored.item.id == id)
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

/// An in-memory item store, bookmark table and mutation backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<RepositoryState>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository seeded with the demo collections, items and bookmarks.
    ///
    /// Collections:
    /// - `col-films`      Film Archive
    /// - `col-audio`      Oral Histories
    /// - `col-restricted` Restricted Deposits
    ///
    /// Items `mo-101`..`mo-103` are films, `mo-201`..`mo-202` oral
    /// histories, and `mo-301` sits in the restricted collection.
    pub fn sample() -> ShelfmarkResult<Self> {
        let repo = Self::new();
        repo.add_collection(Collection::new("col-films", "Film Archive"))?;
        repo.add_collection(Collection::new("col-audio", "Oral Histories"))?;
        repo.add_collection(Collection::new("col-restricted", "Restricted Deposits"))?;

        repo.add_item(Item::new("mo-101", "Harbor Footage, 1952").in_collection("col-films"))?;
        repo.add_item(Item::new("mo-102", "Campus Newsreel No. 4").in_collection("col-films"))?;
        repo.add_item(Item::new("mo-103", "Preservation Master Reel").in_collection("col-films"))?;
        repo.add_item(Item::new("mo-201", "Interview with a Lock Keeper").in_collection("col-audio"))?;
        repo.add_item(Item::new("mo-202", "Mill Workers Remember").in_collection("col-audio"))?;
        repo.add_item(Item::new("mo-301", "Donor Correspondence").in_collection("col-restricted"))?;
        Ok(repo)
    }

    pub fn add_collection(&self, collection: Collection) -> ShelfmarkResult<()> {
        self.lock()?.collections.push(collection);
        Ok(())
    }

    pub fn add_item(&self, item: Item) -> ShelfmarkResult<()> {
        self.lock()?.items.push(StoredItem::new(item));
        Ok(())
    }

    /// Replace `principal`'s bookmarks with `ids`, in order.
    pub fn bookmark(&self, principal: &Principal, ids: &[&str]) -> ShelfmarkResult<()> {
        let ids = ids.iter().map(|id| ItemId::new(*id)).collect();
        self.lock()?
            .bookmarks
            .insert(principal.user_key.clone(), ids);
        Ok(())
    }

    /// Make every following mutation call fail.
    pub fn set_failing(&self, failing: bool) -> ShelfmarkResult<()> {
        self.lock()?.fail_mutations = failing;
        Ok(())
    }

    /// A snapshot of the stored record for `id`.
    pub fn stored(&self, id: &str) -> ShelfmarkResult<Option<StoredItem>> {
        let state = self.lock()?;
        Ok(state
            .items
            .iter()
            .find(|stored| stored.item.id.as_str() == id)
            .cloned())
    }

    /// Every mutation call received so far.
    pub fn mutations(&self) -> ShelfmarkResult<Vec<MutationRecord>> {
        Ok(self.lock()?.mutations.clone())
    }

    fn lock(&self) -> ShelfmarkResult<MutexGuard<'_, RepositoryState>> {
        self.state.lock().map_err(|_| ShelfmarkError::ResolverFailed {
            reason: "repository lock poisoned".to_string(),
        })
    }

    /// Lock for a mutation: records the call, then honours the failure toggle.
    fn lock_for_mutation(&self, method: &str, ids: &[ItemId]) -> ShelfmarkResult<MutexGuard<'_, RepositoryState>> {
        let mut state = self.state.lock().map_err(|_| ShelfmarkError::MutationFailed {
            action: method.to_string(),
            reason: "repository lock poisoned".to_string(),
        })?;

        state.mutations.push(MutationRecord {
            method: method.to_string(),
            ids: ids.to_vec(),
        });

        if state.fail_mutations {
            return Err(ShelfmarkError::MutationFailed {
                action: method.to_string(),
                reason: "storage backend unavailable".to_string(),
            });
        }
        Ok(state)
    }
}

// ── Collaborator implementations ──────────────────────────────────────────────

impl ItemSetResolver for InMemoryRepository {
    fn selection(&self, principal: &Principal) -> ShelfmarkResult<Selection> {
        let state = self.lock()?;
        let ids = state
            .bookmarks
            .get(&principal.user_key)
            .cloned()
            .unwrap_or_default();
        Ok(Selection::new(ids))
    }

    fn resolve(&self, id: &ItemId) -> ShelfmarkResult<Option<Item>> {
        let state = self.lock()?;
        Ok(state
            .items
            .iter()
            .find(|stored| &stored.item.id == id)
            .map(|stored| stored.item.clone()))
    }
}

impl CollectionResolver for InMemoryRepository {
    fn resolve_collection(&self, id: &CollectionId) -> ShelfmarkResult<Option<Collection>> {
        let state = self.lock()?;
        Ok(state.collections.iter().find(|c| &c.id == id).cloned())
    }
}

impl BulkMutator for InMemoryRepository {
    fn apply_access_control(&self, ids: &[ItemId], params: &ActionParams) -> ShelfmarkResult<()> {
        let mut state = self.lock_for_mutation("access_control", ids)?;
        let hidden = params.hidden();
        let visibility = params.get("visibility").and_then(Value::as_str).map(str::to_string);
        let add_users = string_list(params, "add_users");
        let remove_users = string_list(params, "remove_users");
        let add_groups = string_list(params, "add_groups");
        let remove_groups = string_list(params, "remove_groups");

        for id in ids {
            let Some(stored) = state.item_mut(id) else { continue };
            if let Some(hidden) = hidden {
                stored.hidden = hidden;
            }
            if let Some(visibility) = &visibility {
                stored.visibility = visibility.clone();
            }
            stored.read_users.extend(add_users.iter().cloned());
            stored.read_groups.extend(add_groups.iter().cloned());
            for user in &remove_users {
                stored.read_users.remove(user);
            }
            for group in &remove_groups {
                stored.read_groups.remove(group);
            }
        }

        info!(count = ids.len(), "access control applied");
        Ok(())
    }

    fn apply_status_change(
        &self,
        ids: &[ItemId],
        status: PublicationStatus,
        actor: &Principal,
        _params: &ActionParams,
    ) -> ShelfmarkResult<()> {
        let mut state = self.lock_for_mutation("status", ids)?;
        for id in ids {
            if let Some(stored) = state.item_mut(id) {
                stored.published = status == PublicationStatus::Published;
                stored.status_changed_by = Some(actor.user_key.clone());
            }
        }

        info!(count = ids.len(), status = ?status, actor = %actor.user_key, "publication status changed");
        Ok(())
    }

    fn apply_delete(&self, ids: &[ItemId], _params: &ActionParams) -> ShelfmarkResult<()> {
        let mut state = self.lock_for_mutation("delete", ids)?;
        // Bookmarks are left in place; stale ids surface as not-found on the
        // next dispatch.
        state.items.retain(|stored| !ids.contains(&stored.item.id));

        info!(count = ids.len(), "items deleted");
        Ok(())
    }

    fn apply_move(&self, ids: &[ItemId], target: &Collection, _params: &ActionParams) -> ShelfmarkResult<()> {
        let mut state = self.lock_for_mutation("move", ids)?;
        for id in ids {
            if let Some(stored) = state.item_mut(id) {
                debug!(item_id = %id, target = %target.id, "moving item");
                stored.item.collection = Some(target.id.clone());
            }
        }

        info!(count = ids.len(), target = %target.id, "items moved");
        Ok(())
    }
}

fn string_list(params: &ActionParams, key: &str) -> Vec<String> {
    params
        .get(key)
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default()
}

// ── Demo principals ───────────────────────────────────────────────────────────

/// Can update any item and read most collections, but not unpublish or delete.
pub fn editor() -> Principal {
    Principal::new("editor@example.edu").with_group("editors")
}

/// An editor who may also unpublish.
pub fn curator() -> Principal {
    Principal::new("curator@example.edu")
        .with_group("editors")
        .with_group("curators")
}

/// Full control over items in the film archive only.
pub fn film_manager() -> Principal {
    Principal::new("films@example.edu").with_group("film-managers")
}

/// Every capability on every resource, except the protected master reel.
pub fn administrator() -> Principal {
    Principal::new("admin@example.edu").with_group("administrators")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
