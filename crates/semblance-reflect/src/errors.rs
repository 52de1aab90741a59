use thiserror::Error;

/// Result type alias using ReflectError
pub type Result<T> = std::result::Result<T, ReflectError>;

/// Error taxonomy for descriptor construction, registry registration, and
/// dynamic message mutation
///
/// All of these are caller-contract violations that fail fast at construction
/// or mutation time; the comparison path itself never produces an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReflectError {
    /// Two fields on the same message type share a field number
    #[error("duplicate field number {number} on message type {type_name}")]
    DuplicateFieldNumber { type_name: String, number: u32 },

    /// Two fields on the same message type share a name
    #[error("duplicate field name '{name}' on message type {type_name}")]
    DuplicateFieldName { type_name: String, name: String },

    /// A oneof lists a member field that does not exist on the message type
    #[error("oneof '{oneof}' on message type {type_name} references unknown field '{name}'")]
    UnknownOneofMember {
        type_name: String,
        oneof: String,
        name: String,
    },

    /// A message or enum type with the same full name is already registered
    #[error("type {full_name} is already registered")]
    DuplicateType { full_name: String },

    /// An extension with the same full name is already registered
    #[error("extension {full_name} is already registered")]
    DuplicateExtension { full_name: String },

    /// A field name was used that does not exist on the message type
    #[error("message type {type_name} has no field named '{name}'")]
    UnknownField { type_name: String, name: String },

    /// A value of the wrong kind was assigned to a field
    #[error("field '{field}' on message type {type_name} expects {expected}")]
    KindMismatch {
        type_name: String,
        field: String,
        expected: String,
    },

    /// An extension was applied to a message type it does not extend
    #[error("extension {extension} extends {extendee}, not {type_name}")]
    ExtendeeMismatch {
        extension: String,
        extendee: String,
        type_name: String,
    },

    /// A descriptor was looked up by a name that is not registered
    #[error("no registered type named {full_name}")]
    TypeNotFound { full_name: String },
}

impl ReflectError {
    /// Get the stable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            ReflectError::DuplicateFieldNumber { .. } => "ERR_DUPLICATE_FIELD_NUMBER",
            ReflectError::DuplicateFieldName { .. } => "ERR_DUPLICATE_FIELD_NAME",
            ReflectError::UnknownOneofMember { .. } => "ERR_UNKNOWN_ONEOF_MEMBER",
            ReflectError::DuplicateType { .. } => "ERR_DUPLICATE_TYPE",
            ReflectError::DuplicateExtension { .. } => "ERR_DUPLICATE_EXTENSION",
            ReflectError::UnknownField { .. } => "ERR_UNKNOWN_FIELD",
            ReflectError::KindMismatch { .. } => "ERR_KIND_MISMATCH",
            ReflectError::ExtendeeMismatch { .. } => "ERR_EXTENDEE_MISMATCH",
            ReflectError::TypeNotFound { .. } => "ERR_TYPE_NOT_FOUND",
        }
    }
}
