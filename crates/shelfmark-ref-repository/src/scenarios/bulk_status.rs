//! Scenario 2: Publish and Unpublish
//!
//! Demonstrates the asymmetric status capabilities:
//!
//! Sub-case A: editor publishes             → every item succeeds (`update`)
//! Sub-case B: editor unpublishes           → every item denied, no mutation
//! Sub-case C: curator unpublishes          → succeeds (`update` + `unpublish`)

use shelfmark_contracts::{action::ActionParams, error::ShelfmarkResult, item::Selection};

use crate::mock_data::{curator, editor, InMemoryRepository};
use crate::scenarios::{build_dispatcher, print_available_actions, print_outcome};

/// Run Scenario 2: Publish and Unpublish.
pub fn run_scenario() -> ShelfmarkResult<()> {
    println!("=== Scenario 2: Publish and Unpublish ===");
    println!();

    let repo = InMemoryRepository::sample()?;
    let dispatcher = build_dispatcher(&repo)?;
    let selection = Selection::from_ids(["mo-201", "mo-202"]);
    let params = ActionParams::new();

    println!("  Selection:              mo-201, mo-202 (Oral Histories)");
    println!();

    // ── Sub-case A ────────────────────────────────────────────────────────────
    let editor = editor();
    println!("  Sub-case A: {} publishes", editor.user_key);
    print_available_actions(&dispatcher, &selection, &editor)?;
    let outcome = dispatcher.dispatch("publish", &selection, &editor, &params)?;
    print_outcome(&outcome);
    println!();

    // ── Sub-case B ────────────────────────────────────────────────────────────
    println!("  Sub-case B: {} unpublishes (no 'unpublish' capability)", editor.user_key);
    let outcome = dispatcher.dispatch("unpublish", &selection, &editor, &params)?;
    print_outcome(&outcome);
    println!();

    // ── Sub-case C ────────────────────────────────────────────────────────────
    let curator = curator();
    println!("  Sub-case C: {} unpublishes", curator.user_key);
    print_available_actions(&dispatcher, &selection, &curator)?;
    let outcome = dispatcher.dispatch("unpublish", &selection, &curator, &params)?;
    print_outcome(&outcome);

    if let Some(stored) = repo.stored("mo-201")? {
        println!(
            "  mo-201 published:       {} (last changed by {})",
            stored.published,
            stored.status_changed_by.as_deref().unwrap_or("nobody")
        );
    }
    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}
