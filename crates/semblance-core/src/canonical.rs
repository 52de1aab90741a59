//! Canonical transform: the rule-relaxed normal form of a message tree.
//!
//! Entries are keyed by a stable [`FieldId`] and kept sorted, so two
//! representations differing only in ignorable content produce syntactically
//! identical canonical trees. Canonical forms are transient, computed per
//! comparison, and hold no identity beyond the comparison call.

use serde::Serialize;

use semblance_reflect::{
    Cardinality, FieldDescriptor, FieldType, MapKey, MessageValue, ScalarValue, Value,
};

use crate::rules::RuleSet;

/// Stable identity of a canonical entry: declared fields by number,
/// extensions by global descriptor full name. The derived ordering places
/// declared fields (in number order) before extensions (in name order).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum FieldId {
    Number(u32),
    Extension(String),
}

/// One canonicalized field entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalField {
    /// Stable identity used for lock-step matching
    pub id: FieldId,
    /// Field name (or extension full name), used in diff paths
    pub name: String,
    /// The canonicalized value
    pub value: CanonicalValue,
}

/// The canonical form of one message value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalMessage {
    /// Full name of the schema type
    pub type_name: String,
    /// True for a null reference (distinct from an all-unset instance under
    /// the base rules; normalized away under ignore-empty-messages)
    pub invalid: bool,
    /// Canonical entries, sorted by id; ignorable fields are omitted
    /// entirely rather than set to a placeholder
    pub entries: Vec<CanonicalField>,
    /// The unrecognized-data bucket as a single raw-byte equality unit;
    /// `None` when empty or ignored
    pub unknown: Option<Vec<u8>>,
}

impl CanonicalMessage {
    /// True when nothing observable remains: no entries and no unknown data.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.unknown.is_none()
    }

    /// Look up an entry by id.
    pub fn entry(&self, id: &FieldId) -> Option<&CanonicalField> {
        self.entries.iter().find(|e| &e.id == id)
    }
}

/// A canonicalized value. Scalars keep their native equality (floating-point
/// is IEEE-exact); maps are sorted by key so insertion order never matters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CanonicalValue {
    Scalar(ScalarValue),
    Enum(i32),
    Message(CanonicalMessage),
    List(Vec<CanonicalValue>),
    Map(Vec<(MapKey, CanonicalValue)>),
}

/// Canonicalize a top-level value.
///
/// This is the no-field-context entry point: a bare collection handed
/// directly to the comparator is canonicalized element-wise with no
/// empty-element filtering, so its length is compared literally.
pub fn transform_value(value: &Value<'_>, rules: &RuleSet) -> CanonicalValue {
    match value {
        Value::Scalar(s) => CanonicalValue::Scalar(s.clone()),
        Value::Enum(number) => CanonicalValue::Enum(*number),
        Value::Message(mv) => CanonicalValue::Message(transform_message(mv, rules)),
        Value::List(elements) => CanonicalValue::List(
            elements
                .iter()
                .map(|element| transform_value(element, rules))
                .collect(),
        ),
        Value::Map(entries) => {
            let mut out: Vec<(MapKey, CanonicalValue)> = entries
                .iter()
                .map(|(key, entry)| (key.clone(), transform_value(entry, rules)))
                .collect();
            out.sort_by(|a, b| a.0.cmp(&b.0));
            CanonicalValue::Map(out)
        }
    }
}

/// Canonicalize one message value (instance or null reference).
pub fn transform_message(mv: &MessageValue<'_>, rules: &RuleSet) -> CanonicalMessage {
    let type_name = mv.descriptor.full_name().to_string();

    // A wholesale-ignored message type canonicalizes to an empty shell, which
    // also neutralizes comparisons rooted at that type.
    if rules.ignores_message_type(&type_name) {
        return CanonicalMessage {
            type_name,
            invalid: false,
            entries: Vec::new(),
            unknown: None,
        };
    }

    let Some(instance) = mv.instance else {
        return CanonicalMessage {
            type_name,
            // Null and empty collapse only under ignore-empty-messages.
            invalid: !rules.ignores_empty_messages(),
            entries: Vec::new(),
            unknown: None,
        };
    };

    let descriptor = instance.descriptor();
    let mut entries = Vec::new();
    for field in instance.populated_fields() {
        if rules.field_is_ignored(descriptor, &field) {
            continue;
        }
        let Some(value) = instance.get(&field) else {
            continue;
        };
        if let Some(canonical) = transform_field_value(&field, &value, rules) {
            entries.push(CanonicalField {
                id: FieldId::Number(field.number()),
                name: field.name().to_string(),
                value: canonical,
            });
        }
    }
    for (ext, value) in instance.extensions() {
        if rules.field_is_ignored(descriptor, &ext) {
            continue;
        }
        if let Some(canonical) = transform_field_value(&ext, &value, rules) {
            entries.push(CanonicalField {
                id: FieldId::Extension(ext.full_name().to_string()),
                name: ext.full_name().to_string(),
                value: canonical,
            });
        }
    }
    entries.sort_by(|a, b| a.id.cmp(&b.id));

    let unknown = if rules.ignores_unknown() || instance.unknown_bytes().is_empty() {
        None
    } else {
        Some(instance.unknown_bytes().to_vec())
    };

    CanonicalMessage {
        type_name,
        invalid: false,
        entries,
        unknown,
    }
}

/// Canonicalize a populated field value inside its field context, or return
/// `None` when the field collapses to absence under the active rules.
fn transform_field_value(
    field: &FieldDescriptor,
    value: &Value<'_>,
    rules: &RuleSet,
) -> Option<CanonicalValue> {
    match field.cardinality() {
        Cardinality::Singular => transform_singular(field, value, rules),
        Cardinality::Repeated => {
            let Value::List(elements) = value else {
                return Some(transform_value(value, rules));
            };
            let filter_empty = rules.ignores_empty_messages()
                && matches!(field.field_type(), FieldType::Message(_));
            let mut out = Vec::with_capacity(elements.len());
            for element in elements {
                let canonical = transform_value(element, rules);
                if filter_empty {
                    if let CanonicalValue::Message(m) = &canonical {
                        if m.is_empty() {
                            continue;
                        }
                    }
                }
                out.push(canonical);
            }
            // A fully filtered field collapses to absence, matching a peer
            // that never populated it.
            if out.is_empty() {
                None
            } else {
                Some(CanonicalValue::List(out))
            }
        }
        Cardinality::Map(_) => {
            let Value::Map(map_entries) = value else {
                return Some(transform_value(value, rules));
            };
            let filter_empty = rules.ignores_empty_messages()
                && matches!(field.field_type(), FieldType::Message(_));
            let mut out = Vec::with_capacity(map_entries.len());
            for (key, entry) in map_entries {
                let canonical = transform_value(entry, rules);
                if filter_empty {
                    if let CanonicalValue::Message(m) = &canonical {
                        if m.is_empty() {
                            continue;
                        }
                    }
                }
                out.push((key.clone(), canonical));
            }
            out.sort_by(|a, b| a.0.cmp(&b.0));
            if out.is_empty() {
                None
            } else {
                Some(CanonicalValue::Map(out))
            }
        }
    }
}

fn transform_singular(
    field: &FieldDescriptor,
    value: &Value<'_>,
    rules: &RuleSet,
) -> Option<CanonicalValue> {
    match (field.field_type(), value) {
        (FieldType::Scalar(_), Value::Scalar(s)) => {
            if rules.ignores_default_scalars() {
                if let Some(default) = field.default_scalar() {
                    if *s == default {
                        return None;
                    }
                }
            }
            Some(CanonicalValue::Scalar(s.clone()))
        }
        (FieldType::Enum(_), Value::Enum(number)) => {
            if rules.ignores_default_scalars() {
                if let Some(default) = field.default_enum_number() {
                    if *number == default {
                        return None;
                    }
                }
            }
            Some(CanonicalValue::Enum(*number))
        }
        (FieldType::Message(_), Value::Message(mv)) => {
            let canonical = transform_message(mv, rules);
            if rules.ignores_empty_messages() && canonical.is_empty() {
                return None;
            }
            Some(CanonicalValue::Message(canonical))
        }
        // A shape disagreement cannot arise through a well-formed Reflect
        // implementation; canonicalize as-is to keep the transform total.
        _ => Some(transform_value(value, rules)),
    }
}
