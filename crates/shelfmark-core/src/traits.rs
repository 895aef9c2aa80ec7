//! Collaborator trait definitions for the shelfmark dispatcher.
//!
//! These traits define the boundary between the dispatcher and the host
//! repository application:
//!
//! - `CapabilityChecker` : trusted authority (answers capability questions)
//! - `ItemSetResolver`   : selection lookup and live item resolution
//! - `CollectionResolver`: move target lookup
//! - `BulkMutator`       : the opaque bulk mutation routines
//! - `ParamsValidator`   : rejects malformed action parameters up front
//!
//! The dispatcher wires them together in authorize → partition → execute
//! order. `BulkMutator` methods are only ever called with ids that passed
//! every capability check for the operation.

use shelfmark_contracts::{
    action::{ActionParams, PublicationStatus},
    capability::{Capability, Resource},
    error::ShelfmarkResult,
    item::{Collection, CollectionId, Item, ItemId, Principal, Selection},
};

/// Answers "may `principal` exercise `capability` on `resource`?".
///
/// Implementations are **trusted** and must be free of side effects from
/// the dispatcher's point of view: the dispatcher calls `can` once per item
/// and capability, and may call it again on the next request.
pub trait CapabilityChecker: Send + Sync {
    fn can(&self, principal: &Principal, capability: Capability, resource: Resource<'_>) -> bool;
}

/// Resolves a principal's selection and turns ids into live items.
pub trait ItemSetResolver: Send + Sync {
    /// The ordered ids the principal currently has selected (bookmarked).
    fn selection(&self, principal: &Principal) -> ShelfmarkResult<Selection>;

    /// Fetch the current state of one item.
    ///
    /// `Ok(None)` means the id no longer resolves; the dispatcher records a
    /// denial for it. `Err` aborts the whole invocation.
    fn resolve(&self, id: &ItemId) -> ShelfmarkResult<Option<Item>>;

    /// Resolve every id of `selection`, in selection order.
    fn resolve_all(&self, selection: &Selection) -> ShelfmarkResult<Vec<(ItemId, Option<Item>)>> {
        selection
            .ids()
            .iter()
            .map(|id| self.resolve(id).map(|item| (id.clone(), item)))
            .collect()
    }
}

/// Looks up the target collection of a move.
pub trait CollectionResolver: Send + Sync {
    fn resolve_collection(&self, id: &CollectionId) -> ShelfmarkResult<Option<Collection>>;
}

/// The bulk mutation routines of the host repository.
///
/// Each method receives the full authorized id set in one call and succeeds
/// or fails as a whole. A failure is fatal for the invocation; the
/// dispatcher does not retry.
pub trait BulkMutator: Send + Sync {
    fn apply_access_control(&self, ids: &[ItemId], params: &ActionParams) -> ShelfmarkResult<()>;

    /// Publish or unpublish `ids`. `actor` is recorded as the user who made
    /// the change.
    fn apply_status_change(
        &self,
        ids: &[ItemId],
        status: PublicationStatus,
        actor: &Principal,
        params: &ActionParams,
    ) -> ShelfmarkResult<()>;

    fn apply_delete(&self, ids: &[ItemId], params: &ActionParams) -> ShelfmarkResult<()>;

    fn apply_move(&self, ids: &[ItemId], target: &Collection, params: &ActionParams) -> ShelfmarkResult<()>;
}

/// Validates action parameters before the dispatcher does any work.
pub trait ParamsValidator: Send + Sync {
    /// Return `Err(ShelfmarkError::InvalidParams)` when `params` are not
    /// acceptable for `action`.
    fn validate(&self, action: &str, params: &ActionParams) -> ShelfmarkResult<()>;
}
