//! Schema descriptors: the structural definition of message types.
//!
//! Descriptor identity is the full name. Two descriptors constructed
//! independently with the same full name denote the same schema type; this is
//! what makes differently-represented instances of one schema comparable.

use std::sync::Arc;

use crate::errors::{ReflectError, Result};
use crate::value::ScalarValue;

/// The kind of a scalar field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Bool,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Float,
    Double,
    String,
    Bytes,
}

/// The kind of an associative field's key. Only boolean, integral, and string
/// kinds may key a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapKeyKind {
    Bool,
    Int32,
    Int64,
    Uint32,
    Uint64,
    String,
}

/// The declared value type of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Scalar(ScalarKind),
    Enum(Arc<EnumDescriptor>),
    Message(Arc<MessageDescriptor>),
}

impl FieldType {
    /// Human-readable label, used in kind-mismatch diagnostics.
    pub fn label(&self) -> String {
        match self {
            FieldType::Scalar(kind) => format!("{:?}", kind).to_lowercase(),
            FieldType::Enum(e) => format!("enum {}", e.full_name()),
            FieldType::Message(m) => format!("message {}", m.full_name()),
        }
    }
}

/// The cardinality of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Singular,
    Repeated,
    /// An associative field keyed by the given kind.
    Map(MapKeyKind),
}

/// A field declared on a message type, or an extension declared against one.
///
/// Regular fields get their full name assigned when attached to a message
/// descriptor. Extensions carry a global full name and the full name of the
/// message type they extend.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    number: u32,
    name: String,
    full_name: String,
    cardinality: Cardinality,
    field_type: FieldType,
    default: Option<ScalarValue>,
    oneof: Option<String>,
    extendee: Option<String>,
}

impl FieldDescriptor {
    /// Declare a field. The full name is assigned by
    /// [`MessageDescriptor::new`] when the field is attached to its type.
    pub fn new(number: u32, name: &str, cardinality: Cardinality, field_type: FieldType) -> Self {
        Self {
            number,
            name: name.to_string(),
            full_name: name.to_string(),
            cardinality,
            field_type,
            default: None,
            oneof: None,
            extendee: None,
        }
    }

    /// Declare an extension against the message type named `extendee`.
    ///
    /// Extensions are addressed by their global full name rather than a
    /// (type, name) pair.
    pub fn extension(
        number: u32,
        full_name: &str,
        extendee: &str,
        cardinality: Cardinality,
        field_type: FieldType,
    ) -> Arc<Self> {
        let name = full_name.rsplit('.').next().unwrap_or(full_name).to_string();
        Arc::new(Self {
            number,
            name,
            full_name: full_name.to_string(),
            cardinality,
            field_type,
            default: None,
            oneof: None,
            extendee: Some(extendee.to_string()),
        })
    }

    /// Attach a declared default value (singular scalar and enum fields only;
    /// enum defaults are given by number as `ScalarValue::I32`).
    pub fn with_default(mut self, default: ScalarValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Same as [`with_default`](Self::with_default) but usable on an
    /// already-shared extension descriptor.
    pub fn extension_with_default(ext: &Arc<Self>, default: ScalarValue) -> Arc<Self> {
        let mut inner = (**ext).clone();
        inner.default = Some(default);
        Arc::new(inner)
    }

    /// Mark this field as an alternative of the named tagged union.
    pub fn with_oneof(mut self, oneof: &str) -> Self {
        self.oneof = Some(oneof.to_string());
        self
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    /// The name of the tagged union this field belongs to, if any.
    pub fn containing_oneof(&self) -> Option<&str> {
        self.oneof.as_deref()
    }

    /// The full name of the message type this extension extends, if this
    /// descriptor is an extension.
    pub fn extendee(&self) -> Option<&str> {
        self.extendee.as_deref()
    }

    pub fn is_extension(&self) -> bool {
        self.extendee.is_some()
    }

    /// The declared-or-zero default for a singular scalar field.
    ///
    /// Returns `None` for enum, message, repeated, and map fields.
    pub fn default_scalar(&self) -> Option<ScalarValue> {
        match (self.cardinality, &self.field_type) {
            (Cardinality::Singular, FieldType::Scalar(kind)) => Some(
                self.default
                    .clone()
                    .unwrap_or_else(|| ScalarValue::zero(*kind)),
            ),
            _ => None,
        }
    }

    /// The declared-or-zero default number for a singular enum field.
    pub fn default_enum_number(&self) -> Option<i32> {
        match (self.cardinality, &self.field_type) {
            (Cardinality::Singular, FieldType::Enum(_)) => Some(match &self.default {
                Some(ScalarValue::I32(number)) => *number,
                _ => 0,
            }),
            _ => None,
        }
    }
}

/// An enum type: a full name and its named numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDescriptor {
    full_name: String,
    values: Vec<(String, i32)>,
}

impl EnumDescriptor {
    pub fn new(full_name: &str, values: &[(&str, i32)]) -> Arc<Self> {
        Arc::new(Self {
            full_name: full_name.to_string(),
            values: values
                .iter()
                .map(|(name, number)| (name.to_string(), *number))
                .collect(),
        })
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Look up the declared name for a number, if any.
    pub fn name_by_number(&self, number: i32) -> Option<&str> {
        self.values
            .iter()
            .find(|(_, n)| *n == number)
            .map(|(name, _)| name.as_str())
    }
}

/// A tagged union declared on a message type: at most one member field may be
/// populated at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct OneofDescriptor {
    name: String,
    members: Vec<String>,
}

impl OneofDescriptor {
    pub fn new(name: &str, members: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member field names, in declaration order.
    pub fn members(&self) -> &[String] {
        &self.members
    }
}

/// A message type: full name, fields in declaration order, and oneofs.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDescriptor {
    full_name: String,
    fields: Vec<Arc<FieldDescriptor>>,
    oneofs: Vec<OneofDescriptor>,
}

impl MessageDescriptor {
    /// Build a message descriptor, assigning each field's full name.
    ///
    /// # Errors
    ///
    /// - `DuplicateFieldNumber` / `DuplicateFieldName` — two fields collide
    /// - `UnknownOneofMember` — a oneof lists a field that does not exist
    pub fn new(
        full_name: &str,
        fields: Vec<FieldDescriptor>,
        oneofs: Vec<OneofDescriptor>,
    ) -> Result<Arc<Self>> {
        let mut seen_numbers = std::collections::BTreeSet::new();
        let mut seen_names = std::collections::BTreeSet::new();
        for field in &fields {
            if !seen_numbers.insert(field.number) {
                return Err(ReflectError::DuplicateFieldNumber {
                    type_name: full_name.to_string(),
                    number: field.number,
                });
            }
            if !seen_names.insert(field.name.clone()) {
                return Err(ReflectError::DuplicateFieldName {
                    type_name: full_name.to_string(),
                    name: field.name.clone(),
                });
            }
        }
        for oneof in &oneofs {
            for member in oneof.members() {
                if !seen_names.contains(member) {
                    return Err(ReflectError::UnknownOneofMember {
                        type_name: full_name.to_string(),
                        oneof: oneof.name().to_string(),
                        name: member.clone(),
                    });
                }
            }
        }
        let fields = fields
            .into_iter()
            .map(|mut field| {
                field.full_name = format!("{}.{}", full_name, field.name);
                Arc::new(field)
            })
            .collect();
        Ok(Arc::new(Self {
            full_name: full_name.to_string(),
            fields,
            oneofs,
        }))
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Declared fields, in declaration order.
    pub fn fields(&self) -> &[Arc<FieldDescriptor>] {
        &self.fields
    }

    pub fn field_by_number(&self, number: u32) -> Option<&Arc<FieldDescriptor>> {
        self.fields.iter().find(|f| f.number == number)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Arc<FieldDescriptor>> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn oneofs(&self) -> &[OneofDescriptor] {
        &self.oneofs
    }

    pub fn oneof_by_name(&self, name: &str) -> Option<&OneofDescriptor> {
        self.oneofs.iter().find(|o| o.name() == name)
    }
}
