//! # shelfmark-params
//!
//! Parameter validation for bulk actions.
//!
//! This crate provides [`engine::SchemaParamsValidator`], which implements the
//! [`shelfmark_core::traits::ParamsValidator`] trait. It checks an action's
//! parameter object in two phases:
//!
//! 1. **Structural**: JSON Schema validation via the `jsonschema` crate.
//! 2. **Semantic**: rules (`RequiredField`, `AllowedValues`, `Custom`)
//!    evaluated against the parameters.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use shelfmark_params::engine::SchemaParamsValidator;
//!
//! let validator = SchemaParamsValidator::repository_defaults()?;
//! let dispatcher = dispatcher.with_params_validator(Box::new(validator));
//! ```

pub mod engine;
pub mod schema;

pub use engine::{CustomParamsFn, SchemaParamsValidator};
pub use schema::{ParamsRule, ParamsRuleType, ParamsSchema};
