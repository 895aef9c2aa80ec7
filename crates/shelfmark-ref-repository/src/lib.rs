//! # shelfmark-ref-repository
//!
//! Reference media repository for the shelfmark bulk action dispatcher.
//!
//! Demonstrates four bulk action scenarios using mock data:
//!
//! 1. **Bulk Delete**: a mixed selection is partitioned; stale bookmarks
//!    surface as not-found on the next run.
//! 2. **Publish and Unpublish**: publish needs `update`; unpublish needs
//!    `update` and `unpublish`.
//! 3. **Move**: the target collection precondition, checked before any item.
//! 4. **Access Control**: form-encoded flag normalization and parameter
//!    validation.
//!
//! All data is hardcoded and fictional.

pub mod mock_data;
pub mod scenarios;
