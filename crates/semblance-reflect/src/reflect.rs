//! The "describable value" capability interface.
//!
//! Both concrete message representations (statically generated structs and
//! the fully dynamic [`DynamicMessage`](crate::dynamic::DynamicMessage))
//! implement this trait; the comparison engine consumes nothing else. Two
//! instances with the same descriptor and the same reflected content are
//! indistinguishable through this interface regardless of representation.

use std::sync::Arc;

use crate::descriptor::{FieldDescriptor, MessageDescriptor, OneofDescriptor};
use crate::value::Value;

/// Read-only reflective access to one message instance.
///
/// Implementations must not expose unpopulated fields: an empty repeated or
/// associative field, or an unset singular field, is absent from
/// [`populated_fields`](Reflect::populated_fields).
pub trait Reflect {
    /// The schema type of this instance.
    fn descriptor(&self) -> &Arc<MessageDescriptor>;

    /// Populated declared fields, in declaration order.
    fn populated_fields(&self) -> Vec<Arc<FieldDescriptor>>;

    /// The value of a populated declared field, or `None` if unpopulated.
    fn get(&self, field: &FieldDescriptor) -> Option<Value<'_>>;

    /// The raw unrecognized wire data preserved on this instance.
    fn unknown_bytes(&self) -> &[u8];

    /// Populated extension values, keyed by their global descriptors, in
    /// full-name order.
    fn extensions(&self) -> Vec<(Arc<FieldDescriptor>, Value<'_>)>;

    /// The currently selected alternative of a tagged union, if any.
    ///
    /// The default implementation derives the selection from the populated
    /// field set, which is correct for any implementation that maintains the
    /// at-most-one-alternative invariant.
    fn selected_alternative(&self, oneof: &OneofDescriptor) -> Option<Arc<FieldDescriptor>> {
        self.populated_fields()
            .into_iter()
            .find(|field| field.containing_oneof() == Some(oneof.name()))
    }
}
