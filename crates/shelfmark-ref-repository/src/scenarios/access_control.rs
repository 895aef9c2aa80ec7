//! Scenario 4: Bulk Access Control
//!
//! Sub-case A: administrator hides items with a form-encoded flag
//! Sub-case B: administrator submits an unknown visibility → validation error
//! Sub-case C: editor attempts the same change → every item denied

use serde_json::json;

use shelfmark_contracts::{
    action::ActionParams,
    error::{ShelfmarkError, ShelfmarkResult},
    item::Selection,
};

use crate::mock_data::{administrator, editor, InMemoryRepository};
use crate::scenarios::{build_dispatcher, print_outcome};

/// Run Scenario 4: Bulk Access Control.
pub fn run_scenario() -> ShelfmarkResult<()> {
    println!("=== Scenario 4: Bulk Access Control ===");
    println!();

    let repo = InMemoryRepository::sample()?;
    let dispatcher = build_dispatcher(&repo)?;
    let selection = Selection::from_ids(["mo-101", "mo-202"]);

    // Form posts deliver every value as text.
    let params = ActionParams::from_value(json!({
        "hidden": "true",
        "visibility": "restricted",
        "add_groups": ["faculty"]
    }))?;

    // ── Sub-case A ────────────────────────────────────────────────────────────
    let admin = administrator();
    println!("  Sub-case A: {} sets hidden=\"true\", visibility=restricted", admin.user_key);
    let outcome = dispatcher.dispatch("update_access_control", &selection, &admin, &params)?;
    print_outcome(&outcome);
    if let Some(stored) = repo.stored("mo-101")? {
        println!(
            "  mo-101 now:             hidden={} visibility={} groups={:?}",
            stored.hidden, stored.visibility, stored.read_groups
        );
    }
    println!();

    // ── Sub-case B ────────────────────────────────────────────────────────────
    println!("  Sub-case B: {} sets visibility=secret", admin.user_key);
    let bad = ActionParams::new().with("visibility", "secret");
    match dispatcher.dispatch("update_access_control", &selection, &admin, &bad) {
        Err(ShelfmarkError::InvalidParams { reason, .. }) => println!("  REJECTED: {}", reason),
        Err(other) => return Err(other),
        Ok(outcome) => print_outcome(&outcome),
    }
    println!();

    // ── Sub-case C ────────────────────────────────────────────────────────────
    let editor = editor();
    println!("  Sub-case C: {} attempts the change from Sub-case A", editor.user_key);
    let outcome = dispatcher.dispatch("update_access_control", &selection, &editor, &params)?;
    print_outcome(&outcome);
    println!();

    println!("  Scenario 4 complete.");
    println!();

    Ok(())
}
