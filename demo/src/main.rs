//! shelfmark Reference Repository: Demo CLI
//!
//! Runs one or all of the bulk action scenarios. Each scenario uses the real
//! shelfmark components (TOML capability policy, parameter validator,
//! dispatcher, reporter) wired to an in-memory media repository.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- bulk-delete
//!   cargo run -p demo -- bulk-status
//!   cargo run -p demo -- bulk-move
//!   cargo run -p demo -- access-control

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shelfmark_contracts::error::ShelfmarkResult;
use shelfmark_ref_repository::scenarios::{access_control, bulk_delete, bulk_move, bulk_status};

// ── CLI definition ────────────────────────────────────────────────────────────

/// shelfmark: authorized bulk actions over bookmarked repository items.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "shelfmark reference repository demo",
    long_about = "Runs shelfmark bulk action scenarios showing the permission filter,\n\
                  per-item authorization, partitioned execution and outcome reporting."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all four scenarios in sequence.
    RunAll,
    /// Scenario 1: Bulk delete of a mixed selection, then of stale bookmarks.
    BulkDelete,
    /// Scenario 2: Publish and unpublish with asymmetric capabilities.
    BulkStatus,
    /// Scenario 3: Move with the target collection precondition.
    BulkMove,
    /// Scenario 4: Access control with form-encoded parameters.
    AccessControl,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug to see every capability check.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::RunAll => run_all(),
        Command::BulkDelete => bulk_delete::run_scenario(),
        Command::BulkStatus => bulk_status::run_scenario(),
        Command::BulkMove => bulk_move::run_scenario(),
        Command::AccessControl => access_control::run_scenario(),
    };

    match result {
        Ok(()) => {
            println!("All selected scenarios completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_all() -> ShelfmarkResult<()> {
    bulk_delete::run_scenario()?;
    bulk_status::run_scenario()?;
    bulk_move::run_scenario()?;
    access_control::run_scenario()?;
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("shelfmark: Authorized Bulk Actions");
    println!("Reference Repository Demo");
    println!("==================================");
    println!();
    println!("Pipeline per invoked action:");
    println!("  [1] Filter:    offer only actions every selected item permits (advisory)");
    println!("  [2] Authorize: re-resolve each item and check every required capability");
    println!("  [3] Partition: authorized ids vs. per-item denials, in selection order");
    println!("  [4] Execute:   ONE bulk mutation over the authorized ids only");
    println!("  [5] Report:    success count message + one line per denial");
    println!();
}
