//! Scenario 1: Bulk Delete of a Mixed Selection
//!
//! A film archive manager has bookmarked two films and one oral history.
//! Pipeline walk-through for the demo run:
//!   1. The permission filter withholds `delete`: one item is outside the
//!      manager's collection
//!   2. The client submits `delete` anyway; the dispatcher re-checks every item
//!   3. The two films are deleted in one call; the oral history is denied
//!   4. Re-running the action against the stale bookmarks reports the deleted
//!      items as not found and mutates nothing

use shelfmark_contracts::{action::ActionParams, error::ShelfmarkResult};
use shelfmark_core::traits::ItemSetResolver;

use crate::mock_data::{film_manager, InMemoryRepository};
use crate::scenarios::{build_dispatcher, print_available_actions, print_outcome};

/// Run Scenario 1: Bulk Delete.
pub fn run_scenario() -> ShelfmarkResult<()> {
    println!("=== Scenario 1: Bulk Delete of a Mixed Selection ===");
    println!();

    let repo = InMemoryRepository::sample()?;
    let manager = film_manager();
    repo.bookmark(&manager, &["mo-101", "mo-201", "mo-102"])?;
    let dispatcher = build_dispatcher(&repo)?;

    let selection = repo.selection(&manager)?;
    println!("  Principal:              {} (film-managers)", manager.user_key);
    println!("  Bookmarked:             mo-101, mo-201, mo-102");
    print_available_actions(&dispatcher, &selection, &manager)?;
    println!();

    println!("  Sub-case A: client submits 'delete' directly");
    let outcome = dispatcher.dispatch_current("delete", &manager, &ActionParams::new())?;
    print_outcome(&outcome);
    println!();

    println!("  Sub-case B: same request again against stale bookmarks");
    let outcome = dispatcher.dispatch_current("delete", &manager, &ActionParams::new())?;
    print_outcome(&outcome);
    println!();

    println!("  Mutation calls issued:  {}", repo.mutations()?.len());
    println!();
    println!("  Scenario 1 complete.");
    println!();

    Ok(())
}
