//! Semblance Core - configurable structural-equivalence engine
//!
//! This crate decides whether two schema-described message instances are
//! semantically equal under a caller-selected set of relaxation rules, and
//! produces a structural diff when they are not:
//! - Canonical transform: rule-aware normal form of a message tree
//! - Rule set: composable, order-insensitive relaxations
//! - Value comparator: lock-step walk of two canonical trees
//! - Diff reporter: structured divergences plus a human-readable summary
//!
//! The engine is purely functional: no shared state, no I/O, no mutation of
//! the compared instances. Messages are accessed exclusively through the
//! reflective interface in `semblance-reflect`, so statically generated and
//! fully dynamic representations of one schema compare identically.

pub mod canonical;
pub mod diff;
pub mod errors;
pub mod logging;
pub mod rules;

// Re-export commonly used types
pub use canonical::{
    transform_message, transform_value, CanonicalField, CanonicalMessage, CanonicalValue, FieldId,
};
pub use diff::engine::{compare, equal};
pub use diff::human_summary::render_human_summary;
pub use diff::model::{ComparisonReport, Divergence};
pub use errors::{Result, RuleError};
pub use rules::RuleSet;
