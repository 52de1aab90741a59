//! Injected, read-only descriptor lookup service.
//!
//! Callers build a registry once, register the schema types and extensions
//! they care about, and hand it (by reference) to whatever needs lookups.
//! Nothing in this crate or the engine reaches for a process-wide singleton.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::descriptor::{FieldDescriptor, MessageDescriptor};
use crate::errors::{ReflectError, Result};

/// A read-only mapping from full names to message and extension descriptors.
#[derive(Debug, Clone, Default)]
pub struct DescriptorRegistry {
    messages: BTreeMap<String, Arc<MessageDescriptor>>,
    extensions: BTreeMap<String, Arc<FieldDescriptor>>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a message type.
    ///
    /// # Errors
    ///
    /// - `DuplicateType` — a type with this full name is already registered
    pub fn register_message(&mut self, descriptor: Arc<MessageDescriptor>) -> Result<()> {
        let full_name = descriptor.full_name().to_string();
        if self.messages.contains_key(&full_name) {
            return Err(ReflectError::DuplicateType { full_name });
        }
        self.messages.insert(full_name, descriptor);
        Ok(())
    }

    /// Register an extension descriptor under its global full name.
    ///
    /// # Errors
    ///
    /// - `DuplicateExtension` — an extension with this full name exists
    /// - `ExtendeeMismatch` — the descriptor does not declare an extendee,
    ///   so it has no clear owning type
    pub fn register_extension(&mut self, descriptor: Arc<FieldDescriptor>) -> Result<()> {
        let full_name = descriptor.full_name().to_string();
        if descriptor.extendee().is_none() {
            return Err(ReflectError::ExtendeeMismatch {
                extension: full_name,
                extendee: "(none)".to_string(),
                type_name: "(none)".to_string(),
            });
        }
        if self.extensions.contains_key(&full_name) {
            return Err(ReflectError::DuplicateExtension { full_name });
        }
        self.extensions.insert(full_name, descriptor);
        Ok(())
    }

    /// Look up a message type by full name.
    ///
    /// # Errors
    ///
    /// - `TypeNotFound` — no message with this full name is registered
    pub fn message_by_name(&self, full_name: &str) -> Result<Arc<MessageDescriptor>> {
        self.messages
            .get(full_name)
            .cloned()
            .ok_or_else(|| ReflectError::TypeNotFound {
                full_name: full_name.to_string(),
            })
    }

    /// Look up an extension by global full name.
    ///
    /// # Errors
    ///
    /// - `TypeNotFound` — no extension with this full name is registered
    pub fn extension_by_name(&self, full_name: &str) -> Result<Arc<FieldDescriptor>> {
        self.extensions
            .get(full_name)
            .cloned()
            .ok_or_else(|| ReflectError::TypeNotFound {
                full_name: full_name.to_string(),
            })
    }

    /// Enumerate the registered extensions declared against a message type,
    /// in full-name order.
    pub fn extensions_of(&self, type_full_name: &str) -> Vec<Arc<FieldDescriptor>> {
        self.extensions
            .values()
            .filter(|ext| ext.extendee() == Some(type_full_name))
            .cloned()
            .collect()
    }
}
