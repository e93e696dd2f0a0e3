//! Domain model for notes, tags and query parameters.
//!
//! # Responsibility
//! - Define read models produced by the shared note store.
//! - Define transient query parameters (`TagsFilter`, `SortMode`).
//!
//! # Invariants
//! - Every note is identified by a stable sync key.
//! - Deletion is a trash flag, never a hard delete.

pub mod note;
pub mod query;
pub mod tag;
