//! Structured comparison report types.
//!
//! All types implement `Debug, Clone, Serialize, PartialEq`. Divergences are
//! emitted in a deterministic order (lock-step walk over sorted canonical
//! entries), so two runs over the same inputs serialize identically.

use serde::Serialize;

use crate::canonical::CanonicalValue;

/// The result of comparing two values under a rule set.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ComparisonReport {
    /// True when the canonical forms are identical
    pub equal: bool,
    /// One entry per field path where the canonical forms diverge; empty
    /// when `equal`
    pub divergences: Vec<Divergence>,
}

impl ComparisonReport {
    /// Paths of all divergences, in emission order.
    pub fn paths(&self) -> Vec<&str> {
        self.divergences.iter().map(|d| d.path.as_str()).collect()
    }
}

/// One field path where the two canonical trees disagree.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Divergence {
    /// Field names from the root, with list indices and map keys
    /// (`"(root)"` for a top-level disagreement)
    pub path: String,
    /// Canonical value on the left side (`None` when absent there)
    pub left: Option<CanonicalValue>,
    /// Canonical value on the right side (`None` when absent there)
    pub right: Option<CanonicalValue>,
}
