//! Relaxation rules and their composition.
//!
//! Each relaxation is immutable data describing what it matches, never a
//! procedural hook. A [`RuleSet`] is the union of these predicates, which
//! makes composition associative, order-insensitive, and idempotent: applying
//! the same relaxation twice has no additional effect.

use std::collections::BTreeSet;
use std::sync::Arc;

use semblance_reflect::{EnumDescriptor, FieldDescriptor, FieldType, MessageDescriptor};

use crate::errors::{Result, RuleError};

/// An accumulation of independent, composable relaxations.
///
/// Rules are scoped: some apply globally by value kind (e.g. every enum of a
/// given type, wherever nested), others only to an exact (schema type,
/// field/oneof name) pair. A rule never applies transitively to a
/// differently-typed nested message, however structurally similar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    ignore_unknown: bool,
    ignore_default_scalars: bool,
    ignore_empty_messages: bool,
    ignored_enum_types: BTreeSet<String>,
    ignored_message_types: BTreeSet<String>,
    /// (declaring type full name, field name)
    ignored_fields: BTreeSet<(String, String)>,
    /// (declaring type full name, oneof name)
    ignored_oneofs: BTreeSet<(String, String)>,
    /// field/extension descriptor full names
    ignored_descriptors: BTreeSet<String>,
}

impl RuleSet {
    /// The base rule set: strict equality, no relaxation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the unrecognized-data bucket from comparison.
    pub fn ignore_unknown(mut self) -> Self {
        self.ignore_unknown = true;
        self
    }

    /// Collapse "unset" and "explicitly set to the declared-or-zero default"
    /// for singular scalar and enum fields (and extensions). Message fields
    /// are never affected.
    pub fn ignore_default_scalars(mut self) -> Self {
        self.ignore_default_scalars = true;
        self
    }

    /// Collapse null and recursively-empty message values, and filter empty
    /// elements out of message-typed repeated and associative fields. The
    /// filtering applies only inside a message field's canonicalization,
    /// never to a bare top-level collection.
    pub fn ignore_empty_messages(mut self) -> Self {
        self.ignore_empty_messages = true;
        self
    }

    /// Omit every field whose declared value type is one of the given enum
    /// types, wherever nested. Repeated and associative enum fields are
    /// omitted wholesale, not filtered per element.
    pub fn ignore_enums(mut self, enums: &[Arc<EnumDescriptor>]) -> Self {
        for e in enums {
            self.ignored_enum_types.insert(e.full_name().to_string());
        }
        self
    }

    /// Omit every field whose declared value type is one of the given message
    /// types, wherever nested. A comparison whose root instances are of a
    /// named type is neutralized entirely.
    pub fn ignore_messages(mut self, messages: &[Arc<MessageDescriptor>]) -> Self {
        for m in messages {
            self.ignored_message_types.insert(m.full_name().to_string());
        }
        self
    }

    /// Omit the named fields declared directly on the given type. A
    /// same-named field on an unrelated type is unaffected.
    ///
    /// # Errors
    ///
    /// - `FieldNotFound` — a name does not exist on the type
    pub fn ignore_fields(mut self, message: &Arc<MessageDescriptor>, names: &[&str]) -> Result<Self> {
        for name in names {
            if message.field_by_name(name).is_none() {
                return Err(RuleError::FieldNotFound {
                    type_name: message.full_name().to_string(),
                    name: name.to_string(),
                });
            }
            self.ignored_fields
                .insert((message.full_name().to_string(), name.to_string()));
        }
        Ok(self)
    }

    /// Omit all alternatives of the named tagged unions declared directly on
    /// the given type.
    ///
    /// # Errors
    ///
    /// - `OneofNotFound` — a name does not exist on the type
    pub fn ignore_oneofs(mut self, message: &Arc<MessageDescriptor>, names: &[&str]) -> Result<Self> {
        for name in names {
            if message.oneof_by_name(name).is_none() {
                return Err(RuleError::OneofNotFound {
                    type_name: message.full_name().to_string(),
                    name: name.to_string(),
                });
            }
            self.ignored_oneofs
                .insert((message.full_name().to_string(), name.to_string()));
        }
        Ok(self)
    }

    /// Omit precisely the fields or extensions identified by the given
    /// descriptors. This is the way to target an extension, which has no
    /// stable (type, name) pair.
    pub fn ignore_descriptors(mut self, descriptors: &[Arc<FieldDescriptor>]) -> Self {
        for d in descriptors {
            self.ignored_descriptors.insert(d.full_name().to_string());
        }
        self
    }

    /// Union with another rule set. Duplicate or overlapping rules are
    /// idempotent, so `a.merge(b)` equals `b.merge(a)` and
    /// `a.merge(a)` equals `a`.
    pub fn merge(mut self, other: RuleSet) -> Self {
        self.ignore_unknown |= other.ignore_unknown;
        self.ignore_default_scalars |= other.ignore_default_scalars;
        self.ignore_empty_messages |= other.ignore_empty_messages;
        self.ignored_enum_types.extend(other.ignored_enum_types);
        self.ignored_message_types.extend(other.ignored_message_types);
        self.ignored_fields.extend(other.ignored_fields);
        self.ignored_oneofs.extend(other.ignored_oneofs);
        self.ignored_descriptors.extend(other.ignored_descriptors);
        self
    }

    pub fn ignores_unknown(&self) -> bool {
        self.ignore_unknown
    }

    pub fn ignores_default_scalars(&self) -> bool {
        self.ignore_default_scalars
    }

    pub fn ignores_empty_messages(&self) -> bool {
        self.ignore_empty_messages
    }

    pub fn ignores_enum_type(&self, full_name: &str) -> bool {
        self.ignored_enum_types.contains(full_name)
    }

    pub fn ignores_message_type(&self, full_name: &str) -> bool {
        self.ignored_message_types.contains(full_name)
    }

    /// Is this field (or extension) fully ignorable on the given declaring
    /// type?
    pub fn field_is_ignored(
        &self,
        declaring: &MessageDescriptor,
        field: &FieldDescriptor,
    ) -> bool {
        if self.ignored_descriptors.contains(field.full_name()) {
            return true;
        }
        match field.field_type() {
            FieldType::Enum(e) => {
                if self.ignores_enum_type(e.full_name()) {
                    return true;
                }
            }
            FieldType::Message(m) => {
                if self.ignores_message_type(m.full_name()) {
                    return true;
                }
            }
            FieldType::Scalar(_) => {}
        }
        if field.is_extension() {
            // Extensions are targeted by descriptor identity only.
            return false;
        }
        let type_name = declaring.full_name();
        if self
            .ignored_fields
            .contains(&(type_name.to_string(), field.name().to_string()))
        {
            return true;
        }
        if let Some(oneof) = field.containing_oneof() {
            if self
                .ignored_oneofs
                .contains(&(type_name.to_string(), oneof.to_string()))
            {
                return true;
            }
        }
        false
    }
}
