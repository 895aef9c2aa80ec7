//! Turns a `DispatchOutcome` into user-facing messages.
//!
//! This is the only place human-readable text is assembled. Output is plain
//! text with one line per denial; markup is left to the presentation layer.

use shelfmark_contracts::{
    action::BulkOperation,
    outcome::{Denial, DenialReason, DenialSubject, DispatchOutcome, FormattedOutcome},
};

/// Stateless formatter for dispatch outcomes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter;

impl Reporter {
    pub fn new() -> Self {
        Self
    }

    /// Build the success and denial messages for `outcome`.
    ///
    /// The success message carries a count only. The denial message is a
    /// count header followed by one line per denial. A move precondition
    /// failure yields the single collection-level error with no header.
    pub fn format_outcome(&self, outcome: &DispatchOutcome) -> FormattedOutcome {
        let success_message = match outcome.success_ids.len() {
            0 => None,
            n => Some(success_text(outcome, n)),
        };

        let denial_message = if outcome.denials.is_empty() {
            None
        } else {
            let lines: Vec<String> = outcome.denials.iter().map(denial_line).collect();
            if outcome.is_precondition_failure() {
                Some(lines.join("\n"))
            } else {
                Some(format!(
                    "{}\n{}",
                    denial_header(outcome.operation, outcome.denials.len()),
                    lines.join("\n")
                ))
            }
        };

        FormattedOutcome {
            success_message,
            denial_message,
        }
    }
}

/// Shorthand for `Reporter::new().format_outcome(outcome)`.
pub fn format_outcome(outcome: &DispatchOutcome) -> FormattedOutcome {
    Reporter.format_outcome(outcome)
}

fn items(n: usize) -> &'static str {
    if n == 1 {
        "item"
    } else {
        "items"
    }
}

fn success_text(outcome: &DispatchOutcome, n: usize) -> String {
    match outcome.operation {
        BulkOperation::UpdateAccessControl => {
            format!("Access controls were updated on {} {}.", n, items(n))
        }
        BulkOperation::Publish => format!("{} {} successfully published.", n, items(n)),
        BulkOperation::Unpublish => format!("{} {} successfully unpublished.", n, items(n)),
        BulkOperation::Delete => format!("{} {} successfully deleted.", n, items(n)),
        BulkOperation::Move => {
            let target = outcome
                .target
                .as_ref()
                .map(|c| c.name.as_str())
                .unwrap_or("the selected collection");
            format!("{} {} moved to {}.", n, items(n), target)
        }
        BulkOperation::Export(_) => format!("{} {} exported.", n, items(n)),
    }
}

fn denial_header(operation: BulkOperation, n: usize) -> String {
    let verb = match operation {
        BulkOperation::UpdateAccessControl => "update access controls on",
        BulkOperation::Publish => "publish",
        BulkOperation::Unpublish => "unpublish",
        BulkOperation::Delete => "delete",
        BulkOperation::Move => "move",
        BulkOperation::Export(_) => "export",
    };
    format!("Unable to {} {} {}:", verb, n, items(n))
}

fn denial_line(denial: &Denial) -> String {
    match (&denial.subject, &denial.reason) {
        (_, DenialReason::PreconditionFailed { collection_name: Some(name), .. }) => {
            format!("You do not have permission to move items into {}.", name)
        }
        (_, DenialReason::PreconditionFailed { collection_id, collection_name: None }) => {
            format!("Collection {} could not be found.", collection_id)
        }
        (DenialSubject::Item { id, .. }, DenialReason::TargetNotFound) => {
            format!("{} could not be found.", id)
        }
        (DenialSubject::Item { id, title }, DenialReason::PermissionDenied { .. }) => match title {
            Some(title) => format!("{} ({}) permission denied.", title, id),
            None => format!("{} permission denied.", id),
        },
        (DenialSubject::Batch, _) => "The selection could not be processed.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use shelfmark_contracts::{
        action::BulkOperation,
        capability::Capability,
        item::{Collection, CollectionId, Item, ItemId},
        outcome::{Denial, DispatchOutcome},
    };

    use super::{format_outcome, Reporter};

    fn outcome(operation: BulkOperation, successes: &[&str], denials: Vec<Denial>) -> DispatchOutcome {
        DispatchOutcome {
            operation,
            target: None,
            success_ids: successes.iter().map(|id| ItemId::new(*id)).collect(),
            denials,
        }
    }

    #[test]
    fn empty_outcome_has_no_messages() {
        let formatted = format_outcome(&outcome(BulkOperation::Delete, &[], vec![]));
        assert!(formatted.success_message.is_none());
        assert!(formatted.denial_message.is_none());
    }

    #[test]
    fn success_only_counts() {
        let formatted = format_outcome(&outcome(BulkOperation::Delete, &["a", "b", "c"], vec![]));
        assert_eq!(formatted.success_message.as_deref(), Some("3 items successfully deleted."));
        assert!(formatted.denial_message.is_none());
    }

    #[test]
    fn singular_item_wording() {
        let formatted = format_outcome(&outcome(BulkOperation::Publish, &["a"], vec![]));
        assert_eq!(formatted.success_message.as_deref(), Some("1 item successfully published."));
    }

    #[test]
    fn denials_list_title_and_id_per_line() {
        let denials = vec![
            Denial::permission_denied(&Item::new("mo-2", "Field Recording"), Capability::Destroy),
            Denial::not_found(&ItemId::new("mo-9")),
        ];
        let formatted = format_outcome(&outcome(BulkOperation::Delete, &["mo-1"], denials));

        assert_eq!(formatted.success_message.as_deref(), Some("1 item successfully deleted."));
        assert_eq!(
            formatted.denial_message.as_deref(),
            Some("Unable to delete 2 items:\nField Recording (mo-2) permission denied.\nmo-9 could not be found.")
        );
    }

    #[test]
    fn move_success_names_collection() {
        let mut moved = outcome(BulkOperation::Move, &["a", "b"], vec![]);
        moved.target = Some(Collection::new("col-1", "Film Archive"));
        let formatted = Reporter::new().format_outcome(&moved);
        assert_eq!(formatted.success_message.as_deref(), Some("2 items moved to Film Archive."));
    }

    #[test]
    fn move_precondition_is_single_collection_error() {
        let failed = outcome(
            BulkOperation::Move,
            &[],
            vec![Denial::precondition_failed(CollectionId::new("col-1"), Some("Vault".to_string()))],
        );
        let formatted = format_outcome(&failed);
        assert!(formatted.success_message.is_none());
        assert_eq!(
            formatted.denial_message.as_deref(),
            Some("You do not have permission to move items into Vault.")
        );

        let missing = outcome(
            BulkOperation::Move,
            &[],
            vec![Denial::precondition_failed(CollectionId::new("col-404"), None)],
        );
        assert_eq!(
            format_outcome(&missing).denial_message.as_deref(),
            Some("Collection col-404 could not be found.")
        );
    }

    #[test]
    fn access_control_header() {
        let denials = vec![Denial::permission_denied(
            &Item::new("mo-3", "Interview"),
            Capability::UpdateAccessControl,
        )];
        let formatted = format_outcome(&outcome(BulkOperation::UpdateAccessControl, &["mo-1", "mo-2"], denials));
        assert_eq!(
            formatted.success_message.as_deref(),
            Some("Access controls were updated on 2 items.")
        );
        assert!(formatted
            .denial_message
            .unwrap()
            .starts_with("Unable to update access controls on 1 item:\n"));
    }

    #[test]
    fn formatting_is_idempotent() {
        let denials = vec![Denial::permission_denied(&Item::new("x", "X"), Capability::Update)];
        let o = outcome(BulkOperation::Unpublish, &["y"], denials);
        assert_eq!(format_outcome(&o), format_outcome(&o));
    }
}
