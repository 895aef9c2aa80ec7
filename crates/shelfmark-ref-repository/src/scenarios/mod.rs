//! Reference repository demo scenarios.
//!
//! Each scenario seeds an `InMemoryRepository`, wires it into a real
//! `BulkActionDispatcher` (TOML capability policy, schema parameter
//! validation) and walks one bulk action through filter, authorize,
//! partition, execute and report.

pub mod access_control;
pub mod bulk_delete;
pub mod bulk_move;
pub mod bulk_status;

use shelfmark_contracts::{
    error::ShelfmarkResult,
    item::{Principal, Selection},
    outcome::DispatchOutcome,
};
use shelfmark_core::{format_outcome, ActionRegistry, BulkActionDispatcher};
use shelfmark_params::SchemaParamsValidator;
use shelfmark_policy::TomlCapabilityChecker;

use crate::mock_data::InMemoryRepository;

// ── Policy TOML ───────────────────────────────────────────────────────────────

/// Embedded capability policy shared by every scenario.
pub const REPOSITORY_POLICY: &str = include_str!("../../policies/repository.toml");

// ── Wiring ────────────────────────────────────────────────────────────────────

/// Build a dispatcher over the repository catalog, backed by `repo`.
pub fn build_dispatcher(repo: &InMemoryRepository) -> ShelfmarkResult<BulkActionDispatcher> {
    let checker = TomlCapabilityChecker::from_toml_str(REPOSITORY_POLICY)?;
    let validator = SchemaParamsValidator::repository_defaults()?;

    Ok(BulkActionDispatcher::new(
        ActionRegistry::repository(),
        Box::new(checker),
        Box::new(repo.clone()),
        Box::new(repo.clone()),
        Box::new(repo.clone()),
    )
    .with_params_validator(Box::new(validator)))
}

// ── Printing helpers ──────────────────────────────────────────────────────────

/// Print the toolbar the host UI would render for `principal`'s selection.
pub(crate) fn print_available_actions(
    dispatcher: &BulkActionDispatcher,
    selection: &Selection,
    principal: &Principal,
) -> ShelfmarkResult<()> {
    let offered = dispatcher.compute_available_actions(selection, principal)?;
    let names: Vec<&str> = offered.iter().map(|a| a.name.as_str()).collect();
    println!(
        "  Offered actions:        {}",
        if names.is_empty() { "(none)".to_string() } else { names.join(", ") }
    );
    Ok(())
}

/// Print the flash messages for `outcome`, indented under the scenario.
pub(crate) fn print_outcome(outcome: &DispatchOutcome) {
    let formatted = format_outcome(outcome);
    println!(
        "  Authorized / denied:    {} / {}",
        outcome.success_ids.len(),
        outcome.denials.len()
    );
    if let Some(success) = &formatted.success_message {
        println!("  [success] {}", success);
    }
    if let Some(denial) = &formatted.denial_message {
        for (i, line) in denial.lines().enumerate() {
            if i == 0 {
                println!("  [alert]   {}", line);
            } else {
                println!("            {}", line);
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;

    use shelfmark_contracts::{
        action::ActionParams,
        error::ShelfmarkError,
        item::{CollectionId, ItemId, Principal, Selection},
        outcome::{DenialReason, DenialSubject},
    };
    use shelfmark_core::{format_outcome, traits::ItemSetResolver, BulkActionDispatcher};

    use super::build_dispatcher;
    use crate::mock_data::{administrator, curator, editor, film_manager, InMemoryRepository};

    fn names(dispatcher: &BulkActionDispatcher, selection: &Selection, who: &Principal) -> Vec<String> {
        dispatcher
            .compute_available_actions(selection, who)
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect()
    }

    #[test]
    fn embedded_policy_parses() {
        let repo = InMemoryRepository::sample().unwrap();
        assert!(build_dispatcher(&repo).is_ok());
    }

    #[test]
    fn offered_actions_follow_policy() {
        let repo = InMemoryRepository::sample().unwrap();
        let dispatcher = build_dispatcher(&repo).unwrap();

        let films = Selection::from_ids(["mo-101", "mo-102"]);
        assert_eq!(
            names(&dispatcher, &films, &film_manager()),
            vec!["update_access_control", "move", "publish", "unpublish", "delete"]
        );
        assert_eq!(names(&dispatcher, &films, &editor()), vec!["move", "publish"]);
        assert_eq!(names(&dispatcher, &films, &curator()), vec!["move", "publish", "unpublish"]);

        let mixed = Selection::from_ids(["mo-101", "mo-201"]);
        assert!(!names(&dispatcher, &mixed, &film_manager()).contains(&"delete".to_string()));
    }

    #[test]
    fn delete_partitions_mixed_selection() {
        let repo = InMemoryRepository::sample().unwrap();
        repo.bookmark(&film_manager(), &["mo-101", "mo-201", "mo-102"]).unwrap();
        let dispatcher = build_dispatcher(&repo).unwrap();

        let outcome = dispatcher
            .dispatch_current("delete", &film_manager(), &ActionParams::new())
            .unwrap();

        assert_eq!(outcome.success_ids, vec![ItemId::new("mo-101"), ItemId::new("mo-102")]);
        assert_eq!(outcome.denials.len(), 1);
        assert_eq!(outcome.denials[0].item_id(), Some(&ItemId::new("mo-201")));

        // The deleted items stay bookmarked and now fail to resolve.
        let again = dispatcher
            .dispatch_current("delete", &film_manager(), &ActionParams::new())
            .unwrap();
        assert!(again.success_ids.is_empty());
        let reasons: Vec<&DenialReason> = again.denials.iter().map(|d| &d.reason).collect();
        assert_eq!(reasons[0], &DenialReason::TargetNotFound);
        assert_eq!(reasons[2], &DenialReason::TargetNotFound);
        assert_eq!(repo.mutations().unwrap().len(), 1);
    }

    #[test]
    fn preservation_master_survives_administrator() {
        let repo = InMemoryRepository::sample().unwrap();
        let dispatcher = build_dispatcher(&repo).unwrap();

        let outcome = dispatcher
            .dispatch(
                "delete",
                &Selection::from_ids(["mo-102", "mo-103"]),
                &administrator(),
                &ActionParams::new(),
            )
            .unwrap();

        assert_eq!(outcome.success_ids, vec![ItemId::new("mo-102")]);
        assert!(repo.resolve(&ItemId::new("mo-103")).unwrap().is_some());
    }

    #[test]
    fn move_into_restricted_collection_is_refused() {
        let repo = InMemoryRepository::sample().unwrap();
        let dispatcher = build_dispatcher(&repo).unwrap();
        let params = ActionParams::new().with("target_collection_id", "col-restricted");

        let outcome = dispatcher
            .dispatch("move", &Selection::from_ids(["mo-201"]), &editor(), &params)
            .unwrap();

        assert!(outcome.is_precondition_failure());
        assert_eq!(outcome.denials[0].subject, DenialSubject::Batch);
        assert_eq!(
            format_outcome(&outcome).denial_message.as_deref(),
            Some("You do not have permission to move items into Restricted Deposits.")
        );
        assert!(repo.mutations().unwrap().is_empty());
    }

    #[test]
    fn move_relocates_items() {
        let repo = InMemoryRepository::sample().unwrap();
        let dispatcher = build_dispatcher(&repo).unwrap();
        let params = ActionParams::new().with("target_collection_id", "col-audio");

        let outcome = dispatcher
            .dispatch("move", &Selection::from_ids(["mo-101"]), &editor(), &params)
            .unwrap();

        assert_eq!(outcome.success_ids, vec![ItemId::new("mo-101")]);
        let item = repo.resolve(&ItemId::new("mo-101")).unwrap().unwrap();
        assert_eq!(item.collection, Some(CollectionId::new("col-audio")));
    }

    #[test]
    fn move_without_target_is_rejected_by_validator() {
        let repo = InMemoryRepository::sample().unwrap();
        let dispatcher = build_dispatcher(&repo).unwrap();

        let result = dispatcher.dispatch("move", &Selection::from_ids(["mo-101"]), &editor(), &ActionParams::new());
        assert!(matches!(result, Err(ShelfmarkError::InvalidParams { .. })));
    }

    #[test]
    fn unpublish_needs_curator() {
        let repo = InMemoryRepository::sample().unwrap();
        let dispatcher = build_dispatcher(&repo).unwrap();
        let selection = Selection::from_ids(["mo-201", "mo-202"]);

        let denied = dispatcher
            .dispatch("unpublish", &selection, &editor(), &ActionParams::new())
            .unwrap();
        assert!(denied.success_ids.is_empty());
        assert_eq!(denied.denials.len(), 2);
        assert!(repo.mutations().unwrap().is_empty());

        let allowed = dispatcher
            .dispatch("unpublish", &selection, &curator(), &ActionParams::new())
            .unwrap();
        assert_eq!(allowed.success_ids.len(), 2);
        let stored = repo.stored("mo-201").unwrap().unwrap();
        assert_eq!(stored.status_changed_by.as_deref(), Some("curator@example.edu"));
    }

    #[test]
    fn access_control_normalizes_hidden_flag() {
        let repo = InMemoryRepository::sample().unwrap();
        let dispatcher = build_dispatcher(&repo).unwrap();
        let params = ActionParams::from_value(json!({ "hidden": "true", "visibility": "restricted" })).unwrap();

        let outcome = dispatcher
            .dispatch("update_access_control", &Selection::from_ids(["mo-202"]), &administrator(), &params)
            .unwrap();

        assert_eq!(outcome.success_ids.len(), 1);
        let stored = repo.stored("mo-202").unwrap().unwrap();
        assert!(stored.hidden);
        assert_eq!(stored.visibility, "restricted");
    }

    #[test]
    fn storage_failure_propagates() {
        let repo = InMemoryRepository::sample().unwrap();
        repo.set_failing(true).unwrap();
        let dispatcher = build_dispatcher(&repo).unwrap();

        let result = dispatcher.dispatch("publish", &Selection::from_ids(["mo-101"]), &editor(), &ActionParams::new());
        assert!(matches!(result, Err(ShelfmarkError::MutationFailed { .. })));
    }
}
