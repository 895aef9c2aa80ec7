//! The bulk action dispatcher: authorize, partition, execute, report.
//!
//! For one invoked action the dispatcher enforces this order:
//!
//!   Lookup → Params → [Move target precondition] → Per-item capability
//!   checks → Partition → One bulk mutation on the authorized ids
//!
//! The invariant is structural: `BulkMutator` is only ever called with ids
//! whose items were re-resolved in this invocation and passed every
//! capability the operation requires. The permission filter that shaped the
//! UI is never trusted; a client can submit any action name directly.

use tracing::{debug, error, info, warn};

use shelfmark_contracts::{
    action::{ActionParams, BulkOperation, DispatchId},
    capability::{Capability, Resource},
    error::{ShelfmarkError, ShelfmarkResult},
    item::{Collection, Item, Principal, Selection},
    outcome::{Denial, DispatchOutcome},
};

use crate::{
    filter::PermissionFilter,
    registry::{ActionDescriptor, ActionRegistry},
    traits::{BulkMutator, CapabilityChecker, CollectionResolver, ItemSetResolver, ParamsValidator},
};

/// Runs bulk actions against a principal's selection.
///
/// Holds the action catalog and the collaborators; keeps no per-request
/// state, so one dispatcher can serve every request of the application.
pub struct BulkActionDispatcher {
    registry: ActionRegistry,
    checker: Box<dyn CapabilityChecker>,
    items: Box<dyn ItemSetResolver>,
    collections: Box<dyn CollectionResolver>,
    mutator: Box<dyn BulkMutator>,
    validator: Option<Box<dyn ParamsValidator>>,
}

impl BulkActionDispatcher {
    /// Create a dispatcher over `registry` with the given collaborators.
    pub fn new(
        registry: ActionRegistry,
        checker: Box<dyn CapabilityChecker>,
        items: Box<dyn ItemSetResolver>,
        collections: Box<dyn CollectionResolver>,
        mutator: Box<dyn BulkMutator>,
    ) -> Self {
        Self {
            registry,
            checker,
            items,
            collections,
            mutator,
            validator: None,
        }
    }

    /// Validate action parameters with `validator` before every dispatch.
    pub fn with_params_validator(mut self, validator: Box<dyn ParamsValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// A permission filter over this dispatcher's catalog and collaborators.
    pub fn permission_filter(&self) -> PermissionFilter<'_> {
        PermissionFilter::new(&self.registry, self.checker.as_ref(), self.items.as_ref())
    }

    /// The actions to offer for `selection`. See `PermissionFilter`.
    pub fn compute_available_actions(
        &self,
        selection: &Selection,
        principal: &Principal,
    ) -> ShelfmarkResult<Vec<ActionDescriptor>> {
        self.permission_filter().compute_available_actions(selection, principal)
    }

    /// Dispatch `action` against the principal's current selection, as
    /// returned by `ItemSetResolver::selection`.
    pub fn dispatch_current(
        &self,
        action: &str,
        principal: &Principal,
        params: &ActionParams,
    ) -> ShelfmarkResult<DispatchOutcome> {
        let selection = self.items.selection(principal)?;
        self.dispatch(action, &selection, principal, params)
    }

    /// Run one bulk action.
    ///
    /// # Protocol
    ///
    /// 1. Look up `action` in the registry
    /// 2. Validate `params` (if a validator is configured)
    /// 3. For `move`: resolve the target collection and check `read` on it.
    ///    A missing or unreadable target returns an outcome holding a single
    ///    batch denial; no item is checked and nothing is mutated
    /// 4. Re-resolve each selected id, in selection order, and check the
    ///    operation's capabilities; the first missing one denies the item
    /// 5. Call the bulk mutation once with every authorized id (skipped when
    ///    none were authorized)
    ///
    /// # Errors
    ///
    /// Unknown or non-dispatchable actions, invalid parameters, resolver
    /// failures and mutation failures are returned as `Err`. Per-item
    /// denials are NOT errors; they are recorded in the outcome.
    pub fn dispatch(
        &self,
        action: &str,
        selection: &Selection,
        principal: &Principal,
        params: &ActionParams,
    ) -> ShelfmarkResult<DispatchOutcome> {
        let dispatch_id = DispatchId::new().0.to_string();

        // ── Step 1: Resolve the action ───────────────────────────────────────
        let descriptor = self
            .registry
            .get(action)
            .ok_or_else(|| ShelfmarkError::UnknownAction { name: action.to_string() })?;
        let operation = descriptor.operation;

        if !operation.is_dispatchable() {
            return Err(ShelfmarkError::UnsupportedAction { name: action.to_string() });
        }

        debug!(
            dispatch_id = %dispatch_id,
            action = %action,
            principal = %principal.user_key,
            selection_size = selection.len(),
            "bulk dispatch starting"
        );

        // ── Step 2: Parameters ───────────────────────────────────────────────
        if let Some(validator) = &self.validator {
            validator.validate(action, params)?;
        }

        let mut params = params.clone();
        if operation == BulkOperation::UpdateAccessControl {
            params.normalize_hidden();
        }

        let mut outcome = DispatchOutcome::new(operation);

        // ── Step 3: Whole-batch precondition (move only) ─────────────────────
        //
        // Checked before any item so an unreadable target costs no per-item
        // capability checks.
        if operation == BulkOperation::Move {
            match self.move_target(&dispatch_id, action, principal, &params)? {
                Ok(collection) => outcome.target = Some(collection),
                Err(denial) => {
                    outcome.denials.push(denial);
                    return Ok(outcome);
                }
            }
        }

        // ── Step 4: Per-item authorization and partition ─────────────────────
        for id in selection.ids() {
            let Some(item) = self.items.resolve(id)? else {
                warn!(
                    dispatch_id = %dispatch_id,
                    action = %action,
                    item_id = %id,
                    "selected item not found"
                );
                outcome.denials.push(Denial::not_found(id));
                continue;
            };

            // Outcomes are keyed by the selected id, not whatever id the
            // resolver hands back, so they always partition the selection.
            match self.missing_capability(&dispatch_id, principal, operation, &item) {
                None => outcome.success_ids.push(id.clone()),
                Some(capability) => {
                    warn!(
                        dispatch_id = %dispatch_id,
                        action = %action,
                        item_id = %id,
                        capability = %capability,
                        "item denied"
                    );
                    outcome
                        .denials
                        .push(Denial::permission_denied(&item, capability).with_item_id(id));
                }
            }
        }

        // ── Step 5: One bulk mutation over the authorized set ────────────────
        if outcome.success_ids.is_empty() {
            debug!(dispatch_id = %dispatch_id, action = %action, "no authorized items, mutation skipped");
        } else {
            self.execute(operation, &outcome, principal, &params).map_err(|e| {
                error!(
                    dispatch_id = %dispatch_id,
                    action = %action,
                    authorized = outcome.success_ids.len(),
                    error = %e,
                    "bulk mutation failed"
                );
                e
            })?;
        }

        info!(
            dispatch_id = %dispatch_id,
            action = %action,
            succeeded = outcome.success_ids.len(),
            denied = outcome.denials.len(),
            "bulk dispatch complete"
        );

        Ok(outcome)
    }

    /// Resolve and authorize the move target.
    ///
    /// The outer `Result` carries resolver and parameter errors; the inner
    /// one is `Err(denial)` when the precondition fails.
    fn move_target(
        &self,
        dispatch_id: &str,
        action: &str,
        principal: &Principal,
        params: &ActionParams,
    ) -> ShelfmarkResult<Result<Collection, Denial>> {
        let collection_id = params.target_collection_id().ok_or_else(|| ShelfmarkError::InvalidParams {
            action: action.to_string(),
            reason: format!("'{}' is required", ActionParams::TARGET_COLLECTION),
        })?;

        let Some(collection) = self.collections.resolve_collection(&collection_id)? else {
            warn!(
                dispatch_id = %dispatch_id,
                collection_id = %collection_id,
                "move target collection not found"
            );
            return Ok(Err(Denial::precondition_failed(collection_id, None)));
        };

        if !self.checker.can(principal, Capability::Read, Resource::Collection(&collection)) {
            warn!(
                dispatch_id = %dispatch_id,
                collection_id = %collection.id,
                principal = %principal.user_key,
                "move target collection not readable"
            );
            return Ok(Err(Denial::precondition_failed(
                collection.id.clone(),
                Some(collection.name.clone()),
            )));
        }

        Ok(Ok(collection))
    }

    /// The first capability `operation` needs that `principal` lacks on
    /// `item`. Later capabilities are not checked once one fails.
    fn missing_capability(
        &self,
        dispatch_id: &str,
        principal: &Principal,
        operation: BulkOperation,
        item: &Item,
    ) -> Option<Capability> {
        operation.required_capabilities().iter().copied().find(|capability| {
            let granted = self.checker.can(principal, *capability, Resource::Item(item));
            debug!(
                dispatch_id = %dispatch_id,
                item_id = %item.id,
                capability = %capability,
                granted,
                "capability checked"
            );
            !granted
        })
    }

    /// Invoke the bulk mutation bound to `operation`.
    fn execute(
        &self,
        operation: BulkOperation,
        outcome: &DispatchOutcome,
        principal: &Principal,
        params: &ActionParams,
    ) -> ShelfmarkResult<()> {
        let ids = &outcome.success_ids;
        match operation {
            BulkOperation::UpdateAccessControl => self.mutator.apply_access_control(ids, params),
            BulkOperation::Publish | BulkOperation::Unpublish => {
                let status = operation.target_status().ok_or_else(|| ShelfmarkError::UnsupportedAction {
                    name: format!("{:?}", operation),
                })?;
                self.mutator.apply_status_change(ids, status, principal, params)
            }
            BulkOperation::Delete => self.mutator.apply_delete(ids, params),
            BulkOperation::Move => {
                let target = outcome.target.as_ref().ok_or_else(|| ShelfmarkError::InvalidParams {
                    action: "move".to_string(),
                    reason: "move target was not resolved".to_string(),
                })?;
                self.mutator.apply_move(ids, target, params)
            }
            BulkOperation::Export(_) => Err(ShelfmarkError::UnsupportedAction {
                name: format!("{:?}", operation),
            }),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
