//! Lock-step comparator over canonical trees.
//!
//! The core entry points are [`equal`] and [`compare`]. Both accept any
//! [`Value`] (a message, a null reference, or a bare collection that
//! transitively contains messages) plus the active [`RuleSet`]. The relation
//! is total: a kind or schema-type mismatch is inequality, never an error.

use std::cmp::Ordering;

use semblance_reflect::{MapKey, ScalarValue, Value};

use crate::canonical::{transform_value, CanonicalMessage, CanonicalValue};
use crate::diff::model::{ComparisonReport, Divergence};
use crate::rules::RuleSet;

/// One step of a divergence path.
enum PathStep {
    Field(String),
    Index(usize),
    Key(MapKey),
    Unknown,
}

fn render_path(steps: &[PathStep]) -> String {
    if steps.is_empty() {
        return "(root)".to_string();
    }
    let mut out = String::new();
    for step in steps {
        match step {
            PathStep::Field(name) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(name);
            }
            PathStep::Index(index) => out.push_str(&format!("[{}]", index)),
            PathStep::Key(key) => out.push_str(&format!("[{}]", key)),
            PathStep::Unknown => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str("(unknown)");
            }
        }
    }
    out
}

/// Decide equality of two values under the given rule set.
pub fn equal(x: &Value<'_>, y: &Value<'_>, rules: &RuleSet) -> bool {
    transform_value(x, rules) == transform_value(y, rules)
}

/// Compare two values under the given rule set and report every divergence.
///
/// The boolean result always matches [`equal`]; the report is purely
/// presentational on top of the same canonical forms.
pub fn compare(x: &Value<'_>, y: &Value<'_>, rules: &RuleSet) -> ComparisonReport {
    let left = transform_value(x, rules);
    let right = transform_value(y, rules);
    let mut divergences = Vec::new();
    let mut path = Vec::new();
    walk(&mut path, Some(&left), Some(&right), &mut divergences);
    let report = ComparisonReport {
        equal: divergences.is_empty(),
        divergences,
    };
    tracing::debug!(
        component = "diff",
        op = "compare",
        equal = report.equal,
        divergences = report.divergences.len(),
        "comparison complete"
    );
    report
}

fn push(
    out: &mut Vec<Divergence>,
    path: &[PathStep],
    left: Option<&CanonicalValue>,
    right: Option<&CanonicalValue>,
) {
    out.push(Divergence {
        path: render_path(path),
        left: left.cloned(),
        right: right.cloned(),
    });
}

fn walk(
    path: &mut Vec<PathStep>,
    a: Option<&CanonicalValue>,
    b: Option<&CanonicalValue>,
    out: &mut Vec<Divergence>,
) {
    match (a, b) {
        (None, None) => {}
        (Some(CanonicalValue::Message(ma)), Some(CanonicalValue::Message(mb))) => {
            walk_messages(path, ma, mb, out);
        }
        (Some(CanonicalValue::List(la)), Some(CanonicalValue::List(lb))) => {
            let len = la.len().max(lb.len());
            for index in 0..len {
                path.push(PathStep::Index(index));
                walk(path, la.get(index), lb.get(index), out);
                path.pop();
            }
        }
        (Some(CanonicalValue::Map(ma)), Some(CanonicalValue::Map(mb))) => {
            walk_maps(path, ma, mb, out);
        }
        (Some(x), Some(y)) => {
            if x != y {
                push(out, path, a, b);
            }
        }
        _ => push(out, path, a, b),
    }
}

fn walk_messages(
    path: &mut Vec<PathStep>,
    a: &CanonicalMessage,
    b: &CanonicalMessage,
    out: &mut Vec<Divergence>,
) {
    if a.type_name != b.type_name || a.invalid != b.invalid {
        push(
            out,
            path,
            Some(&CanonicalValue::Message(a.clone())),
            Some(&CanonicalValue::Message(b.clone())),
        );
        return;
    }
    // Merge-walk the sorted entry lists.
    let mut i = 0;
    let mut j = 0;
    while i < a.entries.len() || j < b.entries.len() {
        match (a.entries.get(i), b.entries.get(j)) {
            (Some(ea), Some(eb)) => match ea.id.cmp(&eb.id) {
                Ordering::Equal => {
                    path.push(PathStep::Field(ea.name.clone()));
                    walk(path, Some(&ea.value), Some(&eb.value), out);
                    path.pop();
                    i += 1;
                    j += 1;
                }
                Ordering::Less => {
                    path.push(PathStep::Field(ea.name.clone()));
                    push(out, path, Some(&ea.value), None);
                    path.pop();
                    i += 1;
                }
                Ordering::Greater => {
                    path.push(PathStep::Field(eb.name.clone()));
                    push(out, path, None, Some(&eb.value));
                    path.pop();
                    j += 1;
                }
            },
            (Some(ea), None) => {
                path.push(PathStep::Field(ea.name.clone()));
                push(out, path, Some(&ea.value), None);
                path.pop();
                i += 1;
            }
            (None, Some(eb)) => {
                path.push(PathStep::Field(eb.name.clone()));
                push(out, path, None, Some(&eb.value));
                path.pop();
                j += 1;
            }
            (None, None) => break,
        }
    }
    if a.unknown != b.unknown {
        let left = a
            .unknown
            .as_ref()
            .map(|bytes| CanonicalValue::Scalar(ScalarValue::Bytes(bytes.clone())));
        let right = b
            .unknown
            .as_ref()
            .map(|bytes| CanonicalValue::Scalar(ScalarValue::Bytes(bytes.clone())));
        path.push(PathStep::Unknown);
        push(out, path, left.as_ref(), right.as_ref());
        path.pop();
    }
}

fn walk_maps(
    path: &mut Vec<PathStep>,
    a: &[(MapKey, CanonicalValue)],
    b: &[(MapKey, CanonicalValue)],
    out: &mut Vec<Divergence>,
) {
    // Both sides are sorted by key.
    let mut i = 0;
    let mut j = 0;
    while i < a.len() || j < b.len() {
        match (a.get(i), b.get(j)) {
            (Some((ka, va)), Some((kb, vb))) => match ka.cmp(kb) {
                Ordering::Equal => {
                    path.push(PathStep::Key(ka.clone()));
                    walk(path, Some(va), Some(vb), out);
                    path.pop();
                    i += 1;
                    j += 1;
                }
                Ordering::Less => {
                    path.push(PathStep::Key(ka.clone()));
                    push(out, path, Some(va), None);
                    path.pop();
                    i += 1;
                }
                Ordering::Greater => {
                    path.push(PathStep::Key(kb.clone()));
                    push(out, path, None, Some(vb));
                    path.pop();
                    j += 1;
                }
            },
            (Some((ka, va)), None) => {
                path.push(PathStep::Key(ka.clone()));
                push(out, path, Some(va), None);
                path.pop();
                i += 1;
            }
            (None, Some((kb, vb))) => {
                path.push(PathStep::Key(kb.clone()));
                push(out, path, None, Some(vb));
                path.pop();
                j += 1;
            }
            (None, None) => break,
        }
    }
}
