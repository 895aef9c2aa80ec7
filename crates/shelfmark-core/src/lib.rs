//! # shelfmark-core
//!
//! The authorized bulk action dispatcher for a media repository's bookmark
//! list.
//!
//! This crate provides:
//! - The collaborator traits (`CapabilityChecker`, `ItemSetResolver`,
//!   `CollectionResolver`, `BulkMutator`, `ParamsValidator`)
//! - The `ActionRegistry` catalog and the `PermissionFilter` that decides
//!   which actions to offer for a selection
//! - The `BulkActionDispatcher` that authorizes, partitions and executes one
//!   bulk action
//! - The `Reporter` that turns the outcome into user-facing messages
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shelfmark_core::{ActionRegistry, BulkActionDispatcher, Reporter};
//!
//! let dispatcher = BulkActionDispatcher::new(
//!     ActionRegistry::repository(), checker, items, collections, mutator,
//! );
//! let offered = dispatcher.compute_available_actions(&selection, &principal)?;
//! let outcome = dispatcher.dispatch("delete", &selection, &principal, &params)?;
//! let messages = Reporter::new().format_outcome(&outcome);
//! ```

pub mod dispatcher;
pub mod filter;
pub mod registry;
pub mod report;
pub mod traits;

#[cfg(test)]
mod test_support;

pub use dispatcher::BulkActionDispatcher;
pub use filter::PermissionFilter;
pub use registry::{ActionDescriptor, ActionRegistry};
pub use report::{format_outcome, Reporter};
