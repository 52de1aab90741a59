use thiserror::Error;

/// Result type alias using RuleError
pub type Result<T> = std::result::Result<T, RuleError>;

/// Caller-contract violations at the rule-construction boundary.
///
/// The comparison path itself has no error taxonomy: comparing mismatched
/// types yields "not equal", never a fault. A rule that names a field or
/// oneof absent from the given schema type can never match anything and most
/// likely indicates a typo, so construction fails fast instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// A field-ignore rule named a field that does not exist on the type
    #[error("message type {type_name} has no field named '{name}'")]
    FieldNotFound { type_name: String, name: String },

    /// A oneof-ignore rule named a oneof that does not exist on the type
    #[error("message type {type_name} has no oneof named '{name}'")]
    OneofNotFound { type_name: String, name: String },
}

impl RuleError {
    /// Get the stable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            RuleError::FieldNotFound { .. } => "ERR_FIELD_NOT_FOUND",
            RuleError::OneofNotFound { .. } => "ERR_ONEOF_NOT_FOUND",
        }
    }
}
