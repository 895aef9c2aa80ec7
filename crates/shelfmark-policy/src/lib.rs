//! # shelfmark-policy
//!
//! A TOML-driven, deny-by-default capability checker for shelfmark.
//!
//! ## Overview
//!
//! This crate provides [`TomlCapabilityChecker`], which implements the
//! [`CapabilityChecker`](shelfmark_core::traits::CapabilityChecker) trait.
//! Rules are declared in a TOML file, evaluated in order, and the first
//! matching rule wins. If no rule matches, the capability is denied.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use shelfmark_policy::engine::TomlCapabilityChecker;
//!
//! let checker = TomlCapabilityChecker::from_file(Path::new("policies/repository.toml"))?;
//! // Pass `Box::new(checker)` to `shelfmark_core::BulkActionDispatcher::new(...)`.
//! ```
//!
//! ## Rule matching
//!
//! Each rule names principals, capabilities and a resource pattern. All three
//! support the wildcard `"*"`; resource patterns are prefixed with `item:` or
//! `collection:`. Item rules may be narrowed with `in_collection`.

pub mod engine;
pub mod rule;

pub use engine::{PolicyDecision, TomlCapabilityChecker};
pub use rule::{PolicyConfig, PolicyRule, RuleEffect};

// ── Tests ─────────────────────────────────────────────────────────────────────
