//! Capability filtering of the action catalog.
//!
//! `PermissionFilter` decides which actions the UI offers for a selection.
//! An action is offered only if every selected item passes every capability
//! the action requires. The result is advisory: the dispatcher enforces the
//! same capabilities again, per item, when the action is invoked.

use std::collections::HashMap;

use tracing::debug;

use shelfmark_contracts::{
    capability::{Capability, Resource},
    error::ShelfmarkResult,
    item::{Item, Principal, Selection},
};

use crate::{
    registry::{ActionDescriptor, ActionRegistry},
    traits::{CapabilityChecker, ItemSetResolver},
};

/// Computes the available action set for one selection.
///
/// Borrowed from the dispatcher (see `BulkActionDispatcher::permission_filter`)
/// or built directly over any checker/resolver pair.
pub struct PermissionFilter<'a> {
    registry: &'a ActionRegistry,
    checker: &'a dyn CapabilityChecker,
    items: &'a dyn ItemSetResolver,
}

impl<'a> PermissionFilter<'a> {
    pub fn new(
        registry: &'a ActionRegistry,
        checker: &'a dyn CapabilityChecker,
        items: &'a dyn ItemSetResolver,
    ) -> Self {
        Self { registry, checker, items }
    }

    /// Return the registered actions permitted on every item of `selection`,
    /// in registry order.
    ///
    /// An id that no longer resolves fails every check, so a selection with
    /// a dangling id offers nothing. An empty selection offers everything.
    pub fn compute_available_actions(
        &self,
        selection: &Selection,
        principal: &Principal,
    ) -> ShelfmarkResult<Vec<ActionDescriptor>> {
        let resolved = self.items.resolve_all(selection)?;
        let any_missing = resolved.iter().any(|(_, item)| item.is_none());
        let items: Vec<Item> = resolved.into_iter().filter_map(|(_, item)| item).collect();

        // Publish and move share the update gate; each capability is
        // evaluated over the selection at most once per call.
        let mut verdicts: HashMap<Capability, bool> = HashMap::new();
        let mut available = Vec::new();

        for descriptor in self.registry.all() {
            let permitted = !any_missing
                && descriptor.required_capabilities().iter().all(|capability| {
                    *verdicts
                        .entry(*capability)
                        .or_insert_with(|| self.all_items_can(principal, *capability, &items))
                });

            debug!(
                action = %descriptor.name,
                permitted,
                selection_size = selection.len(),
                "filtered bulk action"
            );

            if permitted {
                available.push(descriptor.clone());
            }
        }

        Ok(available)
    }

    fn all_items_can(&self, principal: &Principal, capability: Capability, items: &[Item]) -> bool {
        items
            .iter()
            .all(|item| self.checker.can(principal, capability, Resource::Item(item)))
    }
}

#[cfg(test)]
mod tests {
    use shelfmark_contracts::{
        action::{BulkOperation, ExportFormat},
        capability::Capability,
        item::Selection,
    };

    use crate::{
        registry::{self, ActionDescriptor, ActionRegistry},
        test_support::{principal, MockChecker, MockItems},
    };

    use super::PermissionFilter;

    fn names(actions: &[ActionDescriptor]) -> Vec<&str> {
        actions.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn fully_permitted_selection_offers_every_action_in_order() {
        let registry = ActionRegistry::repository();
        let checker = MockChecker::default().grant_all(&Capability::ALL, &["a", "b"]);
        let items = MockItems::with_items(&["a", "b"]);
        let filter = PermissionFilter::new(&registry, &checker, &items);

        let available = filter
            .compute_available_actions(&Selection::from_ids(["a", "b"]), &principal())
            .unwrap();

        assert_eq!(
            names(&available),
            vec![
                registry::UPDATE_ACCESS_CONTROL,
                registry::MOVE,
                registry::PUBLISH,
                registry::UNPUBLISH,
                registry::DELETE,
            ]
        );
    }

    #[test]
    fn one_item_without_destroy_removes_delete_only() {
        let registry = ActionRegistry::repository();
        let checker = MockChecker::default()
            .grant_all(&Capability::ALL, &["a"])
            .grant_all(
                &[Capability::Update, Capability::Unpublish, Capability::UpdateAccessControl],
                &["b"],
            );
        let items = MockItems::with_items(&["a", "b"]);
        let filter = PermissionFilter::new(&registry, &checker, &items);

        let available = filter
            .compute_available_actions(&Selection::from_ids(["a", "b"]), &principal())
            .unwrap();

        assert!(!names(&available).contains(&registry::DELETE));
        assert_eq!(available.len(), 4);
    }

    #[test]
    fn missing_update_removes_publish_move_and_unpublish() {
        let registry = ActionRegistry::repository();
        let checker = MockChecker::default()
            .grant_all(&Capability::ALL, &["a"])
            .grant_all(
                &[Capability::Destroy, Capability::Unpublish, Capability::UpdateAccessControl],
                &["b"],
            );
        let items = MockItems::with_items(&["a", "b"]);
        let filter = PermissionFilter::new(&registry, &checker, &items);

        let available = filter
            .compute_available_actions(&Selection::from_ids(["a", "b"]), &principal())
            .unwrap();

        assert_eq!(
            names(&available),
            vec![registry::UPDATE_ACCESS_CONTROL, registry::DELETE]
        );
    }

    #[test]
    fn unpublish_needs_unpublish_capability_too() {
        let registry = ActionRegistry::repository();
        let checker = MockChecker::default().grant(Capability::Update, "a");
        let items = MockItems::with_items(&["a"]);
        let filter = PermissionFilter::new(&registry, &checker, &items);

        let available = filter
            .compute_available_actions(&Selection::from_ids(["a"]), &principal())
            .unwrap();

        assert_eq!(names(&available), vec![registry::MOVE, registry::PUBLISH]);
    }

    #[test]
    fn each_capability_is_checked_once_per_item() {
        let registry = ActionRegistry::repository();
        let checker = MockChecker::default().grant_all(&Capability::ALL, &["a", "b", "c"]);
        let items = MockItems::with_items(&["a", "b", "c"]);
        let filter = PermissionFilter::new(&registry, &checker, &items);

        filter
            .compute_available_actions(&Selection::from_ids(["a", "b", "c"]), &principal())
            .unwrap();

        // move, publish and unpublish all need update.
        assert_eq!(checker.call_count(Capability::Update), 3);
        assert_eq!(checker.call_count(Capability::Destroy), 3);
    }

    #[test]
    fn dangling_id_offers_nothing() {
        let registry = ActionRegistry::repository();
        let checker = MockChecker::default().grant_all(&Capability::ALL, &["a", "ghost"]);
        let items = MockItems::with_items(&["a"]);
        let filter = PermissionFilter::new(&registry, &checker, &items);

        let available = filter
            .compute_available_actions(&Selection::from_ids(["a", "ghost"]), &principal())
            .unwrap();

        assert!(available.is_empty());
    }

    #[test]
    fn empty_selection_offers_everything_without_checks() {
        let registry = ActionRegistry::repository();
        let checker = MockChecker::default();
        let items = MockItems::default();
        let filter = PermissionFilter::new(&registry, &checker, &items);

        let available = filter
            .compute_available_actions(&Selection::default(), &principal())
            .unwrap();

        assert_eq!(available.len(), registry.len());
        assert!(checker.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn export_actions_are_gated_on_read() {
        let registry = ActionRegistry::base();
        let checker = MockChecker::default().grant(Capability::Read, "a");
        let items = MockItems::with_items(&["a", "b"]);
        let filter = PermissionFilter::new(&registry, &checker, &items);

        let only_a = filter
            .compute_available_actions(&Selection::from_ids(["a"]), &principal())
            .unwrap();
        assert_eq!(only_a.len(), 2);
        assert_eq!(only_a[0].operation, BulkOperation::Export(ExportFormat::Email));

        let both = filter
            .compute_available_actions(&Selection::from_ids(["a", "b"]), &principal())
            .unwrap();
        assert!(both.is_empty());
    }

    #[test]
    fn resolver_failure_propagates() {
        let registry = ActionRegistry::repository();
        let checker = MockChecker::default();
        let mut items = MockItems::with_items(&["a"]);
        items.fail = true;
        let filter = PermissionFilter::new(&registry, &checker, &items);

        assert!(filter
            .compute_available_actions(&Selection::from_ids(["a"]), &principal())
            .is_err());
    }
}
