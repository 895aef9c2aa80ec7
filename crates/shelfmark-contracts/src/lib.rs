//! # shelfmark-contracts
//!
//! Shared types, schemas, and contracts for the shelfmark bulk action
//! dispatcher.
//!
//! All crates in the workspace import from here. No dispatch logic lives in
//! this crate, only data definitions and error types.

pub mod action;
pub mod capability;
pub mod error;
pub mod item;
pub mod outcome;
