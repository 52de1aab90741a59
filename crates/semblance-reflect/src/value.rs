//! Borrowed, schema-typed views of field values.

use serde::Serialize;
use std::sync::Arc;

use crate::descriptor::{MessageDescriptor, ScalarKind};
use crate::reflect::Reflect;

/// An owned scalar value.
///
/// Floating-point variants compare by IEEE equality (`NaN != NaN`,
/// `-0.0 == 0.0`); no tolerance-based comparison exists anywhere in the
/// engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScalarValue {
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Str(String),
    Bytes(Vec<u8>),
}

impl ScalarValue {
    /// The scalar kind this value inhabits.
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarValue::Bool(_) => ScalarKind::Bool,
            ScalarValue::I32(_) => ScalarKind::Int32,
            ScalarValue::I64(_) => ScalarKind::Int64,
            ScalarValue::U32(_) => ScalarKind::Uint32,
            ScalarValue::U64(_) => ScalarKind::Uint64,
            ScalarValue::F32(_) => ScalarKind::Float,
            ScalarValue::F64(_) => ScalarKind::Double,
            ScalarValue::Str(_) => ScalarKind::String,
            ScalarValue::Bytes(_) => ScalarKind::Bytes,
        }
    }

    /// The zero value of the given scalar kind (the implicit default when no
    /// default is declared).
    pub fn zero(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Bool => ScalarValue::Bool(false),
            ScalarKind::Int32 => ScalarValue::I32(0),
            ScalarKind::Int64 => ScalarValue::I64(0),
            ScalarKind::Uint32 => ScalarValue::U32(0),
            ScalarKind::Uint64 => ScalarValue::U64(0),
            ScalarKind::Float => ScalarValue::F32(0.0),
            ScalarKind::Double => ScalarValue::F64(0.0),
            ScalarKind::String => ScalarValue::Str(String::new()),
            ScalarKind::Bytes => ScalarValue::Bytes(Vec::new()),
        }
    }
}

impl From<bool> for ScalarValue {
    fn from(v: bool) -> Self {
        ScalarValue::Bool(v)
    }
}
impl From<i32> for ScalarValue {
    fn from(v: i32) -> Self {
        ScalarValue::I32(v)
    }
}
impl From<i64> for ScalarValue {
    fn from(v: i64) -> Self {
        ScalarValue::I64(v)
    }
}
impl From<u32> for ScalarValue {
    fn from(v: u32) -> Self {
        ScalarValue::U32(v)
    }
}
impl From<u64> for ScalarValue {
    fn from(v: u64) -> Self {
        ScalarValue::U64(v)
    }
}
impl From<f32> for ScalarValue {
    fn from(v: f32) -> Self {
        ScalarValue::F32(v)
    }
}
impl From<f64> for ScalarValue {
    fn from(v: f64) -> Self {
        ScalarValue::F64(v)
    }
}
impl From<&str> for ScalarValue {
    fn from(v: &str) -> Self {
        ScalarValue::Str(v.to_string())
    }
}
impl From<Vec<u8>> for ScalarValue {
    fn from(v: Vec<u8>) -> Self {
        ScalarValue::Bytes(v)
    }
}

/// A key of an associative (map) field.
///
/// Only boolean, integral, and string kinds are valid map keys. The `Ord`
/// implementation gives maps a deterministic canonical order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MapKey {
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    Str(String),
}

impl From<&str> for MapKey {
    fn from(v: &str) -> Self {
        MapKey::Str(v.to_string())
    }
}
impl From<i32> for MapKey {
    fn from(v: i32) -> Self {
        MapKey::I32(v)
    }
}
impl From<u32> for MapKey {
    fn from(v: u32) -> Self {
        MapKey::U32(v)
    }
}
impl From<bool> for MapKey {
    fn from(v: bool) -> Self {
        MapKey::Bool(v)
    }
}

impl std::fmt::Display for MapKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapKey::Bool(v) => write!(f, "{}", v),
            MapKey::I32(v) => write!(f, "{}", v),
            MapKey::I64(v) => write!(f, "{}", v),
            MapKey::U32(v) => write!(f, "{}", v),
            MapKey::U64(v) => write!(f, "{}", v),
            MapKey::Str(v) => write!(f, "\"{}\"", v),
        }
    }
}

/// A message-typed value: the schema type plus an optional instance.
///
/// `instance: None` models a null reference. The descriptor is carried
/// separately so a null reference still knows its schema type, which keeps
/// "null of type A" distinct from "null of type B".
pub struct MessageValue<'a> {
    pub descriptor: Arc<MessageDescriptor>,
    pub instance: Option<&'a dyn Reflect>,
}

/// A borrowed view of any value reachable through the reflective interface.
///
/// This is also the comparison entry point's operand type: callers may hand
/// the engine a message, a null reference, or a bare collection that
/// transitively contains messages.
pub enum Value<'a> {
    Scalar(ScalarValue),
    /// An enum value, by number.
    Enum(i32),
    Message(MessageValue<'a>),
    /// An ordered sequence; element order is significant.
    List(Vec<Value<'a>>),
    /// An associative collection, sorted by key; insertion order is never
    /// significant.
    Map(Vec<(MapKey, Value<'a>)>),
}

impl<'a> Value<'a> {
    /// View a message instance as a value.
    pub fn message(instance: &'a dyn Reflect) -> Value<'a> {
        Value::Message(MessageValue {
            descriptor: instance.descriptor().clone(),
            instance: Some(instance),
        })
    }

    /// A null reference of the given schema type.
    pub fn null_message(descriptor: Arc<MessageDescriptor>) -> Value<'a> {
        Value::Message(MessageValue {
            descriptor,
            instance: None,
        })
    }
}
