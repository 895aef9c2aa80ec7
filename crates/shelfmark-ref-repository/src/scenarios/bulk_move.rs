//! Scenario 3: Move Into a Collection
//!
//! A move is the only action with a batch-level precondition: the principal
//! must be able to read the target collection before any item is checked.
//!
//! Sub-case A: readable target      → items move, one call
//! Sub-case B: restricted target    → single collection error, nothing checked
//! Sub-case C: unknown target       → single not-found error
//! Sub-case D: no target given      → rejected by parameter validation

use shelfmark_contracts::{
    action::ActionParams,
    error::{ShelfmarkError, ShelfmarkResult},
    item::Selection,
};

use crate::mock_data::{editor, InMemoryRepository};
use crate::scenarios::{build_dispatcher, print_outcome};

/// Run Scenario 3: Move Into a Collection.
pub fn run_scenario() -> ShelfmarkResult<()> {
    println!("=== Scenario 3: Move Into a Collection ===");
    println!();

    let repo = InMemoryRepository::sample()?;
    let dispatcher = build_dispatcher(&repo)?;
    let editor = editor();
    let selection = Selection::from_ids(["mo-101", "mo-102"]);

    println!("  Principal:              {} (editors)", editor.user_key);
    println!("  Selection:              mo-101, mo-102 (Film Archive)");
    println!();

    let cases = [
        ("A", "col-audio"),
        ("B", "col-restricted"),
        ("C", "col-missing"),
    ];
    for (label, target) in cases {
        println!("  Sub-case {}: move to '{}'", label, target);
        let params = ActionParams::new().with(ActionParams::TARGET_COLLECTION, target);
        let outcome = dispatcher.dispatch("move", &selection, &editor, &params)?;
        print_outcome(&outcome);
        println!();
    }

    // ── Sub-case D: invalid parameters are an error, not a denial ────────────
    println!("  Sub-case D: move with no target");
    match dispatcher.dispatch("move", &selection, &editor, &ActionParams::new()) {
        Err(ShelfmarkError::InvalidParams { reason, .. }) => {
            println!("  REJECTED: {}", reason);
        }
        Err(other) => return Err(other),
        Ok(outcome) => print_outcome(&outcome),
    }
    println!();

    println!("  Mutation calls issued:  {}", repo.mutations()?.len());
    println!();
    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}
