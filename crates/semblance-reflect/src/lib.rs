//! Reflective message interface for schema-described message trees
//!
//! This crate provides the capability surface the Semblance comparison engine
//! consumes:
//!
//! - **Descriptor model**: message, field, enum, and oneof descriptors with
//!   fail-fast construction
//! - **Registry**: an injected, read-only lookup service for descriptors and
//!   extensions (never a process-wide singleton)
//! - **Value view**: a borrowed, schema-typed view of a field value
//! - **Reflect trait**: the "describable value" interface both generated-style
//!   and fully dynamic representations implement
//! - **DynamicMessage**: the fully dynamic representation, built directly over
//!   registry descriptors

pub mod descriptor;
pub mod dynamic;
pub mod errors;
pub mod reflect;
pub mod registry;
pub mod value;

// Re-export commonly used types
pub use descriptor::{
    Cardinality, EnumDescriptor, FieldDescriptor, FieldType, MapKeyKind, MessageDescriptor,
    OneofDescriptor, ScalarKind,
};
pub use dynamic::{DynamicMessage, OwnedValue};
pub use errors::{ReflectError, Result};
pub use reflect::Reflect;
pub use registry::DescriptorRegistry;
pub use value::{MapKey, MessageValue, ScalarValue, Value};
