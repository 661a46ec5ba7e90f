// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Dynamic value types.

use crate::types::{FieldDescriptor, PrimitiveKind, TypeHandle, ValueError};
use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;
use uuid::Uuid;

/// Fixed-point decimal: `mantissa * 10^-scale`.
///
/// Compared by representation, so `1.0` and `1.00` are different values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Decimal {
    mantissa: i128,
    scale: u32,
}

impl Decimal {
    pub const ZERO: Decimal = Decimal {
        mantissa: 0,
        scale: 0,
    };

    pub const fn new(mantissa: i128, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    pub const fn mantissa(&self) -> i128 {
        self.mantissa
    }

    pub const fn scale(&self) -> u32 {
        self.scale
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.mantissa);
        }
        let digits = self.mantissa.unsigned_abs().to_string();
        let scale = self.scale as usize;
        let padded = format!("{digits:0>width$}", width = scale + 1);
        let (int, frac) = padded.split_at(padded.len() - scale);
        let sign = if self.mantissa < 0 { "-" } else { "" };
        write!(f, "{sign}{int}.{frac}")
    }
}

/// A dynamic value that can hold any mappable type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    // Absent
    Null,

    // Primitives
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Char(char),
    String(String),
    Decimal(Decimal),
    DateTime(DateTime<Utc>),
    Duration(TimeDelta),
    Uuid(Uuid),

    // Composites
    Struct(StructValue),
    Sequence(SequenceValue),
}

impl Value {
    /// Check if value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Primitive kind of a scalar value.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        let kind = match self {
            Self::Bool(_) => PrimitiveKind::Bool,
            Self::U8(_) => PrimitiveKind::U8,
            Self::U16(_) => PrimitiveKind::U16,
            Self::U32(_) => PrimitiveKind::U32,
            Self::U64(_) => PrimitiveKind::U64,
            Self::I8(_) => PrimitiveKind::I8,
            Self::I16(_) => PrimitiveKind::I16,
            Self::I32(_) => PrimitiveKind::I32,
            Self::I64(_) => PrimitiveKind::I64,
            Self::F32(_) => PrimitiveKind::F32,
            Self::F64(_) => PrimitiveKind::F64,
            Self::Char(_) => PrimitiveKind::Char,
            Self::String(_) => PrimitiveKind::String,
            Self::Decimal(_) => PrimitiveKind::Decimal,
            Self::DateTime(_) => PrimitiveKind::DateTime,
            Self::Duration(_) => PrimitiveKind::Duration,
            Self::Uuid(_) => PrimitiveKind::Uuid,
            Self::Null | Self::Struct(_) | Self::Sequence(_) => return None,
        };
        Some(kind)
    }

    /// Name of the runtime type of this value.
    pub fn type_name(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Struct(s) => s.descriptor().name.clone(),
            Self::Sequence(seq) => format!("Vec<{}>", seq.element_type().name),
            scalar => scalar
                .primitive_kind()
                .map(|k| k.type_name())
                .unwrap_or("unknown")
                .to_string(),
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::I32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as u32.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::U32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as struct.
    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Self::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as mutable struct.
    pub fn as_struct_mut(&mut self) -> Option<&mut StructValue> {
        match self {
            Self::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as sequence.
    pub fn as_sequence(&self) -> Option<&SequenceValue> {
        match self {
            Self::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    /// Try to get struct field by exact name.
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.as_struct()?.get(name)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::I32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::U32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<StructValue> for Value {
    fn from(v: StructValue) -> Self {
        Self::Struct(v)
    }
}

impl From<SequenceValue> for Value {
    fn from(v: SequenceValue) -> Self {
        Self::Sequence(v)
    }
}

/// Struct instance: its descriptor plus one value per declared field.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    descriptor: TypeHandle,
    fields: Vec<Value>,
}

impl StructValue {
    /// Instance with every field at its zero value.
    pub fn zeroed(descriptor: &TypeHandle) -> Self {
        let fields = descriptor
            .fields()
            .iter()
            .map(field_zero)
            .collect();
        Self {
            descriptor: descriptor.clone(),
            fields,
        }
    }

    /// Instance from positional field values.
    ///
    /// Missing trailing fields are zero-filled, extra values are dropped.
    pub fn from_fields(descriptor: &TypeHandle, mut fields: Vec<Value>) -> Self {
        let declared = descriptor.fields();
        fields.truncate(declared.len());
        for field in &declared[fields.len()..] {
            fields.push(field_zero(field));
        }
        Self {
            descriptor: descriptor.clone(),
            fields,
        }
    }

    /// Unwrap a struct value of the expected type.
    pub fn expect(value: Value, descriptor: &TypeHandle) -> Result<Self, ValueError> {
        match value {
            Value::Struct(s) if s.descriptor == *descriptor => Ok(s),
            Value::Null => Err(ValueError::UnexpectedNull {
                type_name: descriptor.name.clone(),
            }),
            other => Err(ValueError::TypeMismatch {
                expected: descriptor.name.clone(),
                got: other.type_name(),
            }),
        }
    }

    /// Get the type descriptor.
    pub fn descriptor(&self) -> &TypeHandle {
        &self.descriptor
    }

    /// Field values in declaration order.
    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    /// Into positional field values.
    pub fn into_fields(self) -> Vec<Value> {
        self.fields
    }

    /// Get a field by exact name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let index = self.descriptor.field_index(name)?;
        self.fields.get(index)
    }

    /// Set a field by exact name. Returns `false` if the field does not exist.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> bool {
        match self.descriptor.field_index(name) {
            Some(index) => self.set_at(index, value.into()),
            None => false,
        }
    }

    /// Builder-style [`StructValue::set`].
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Get a field by position.
    pub fn field_at(&self, index: usize) -> Option<&Value> {
        self.fields.get(index)
    }

    /// Set a field by position. Returns `false` if out of bounds.
    pub fn set_at(&mut self, index: usize, value: Value) -> bool {
        match self.fields.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

fn field_zero(field: &FieldDescriptor) -> Value {
    if field.optional {
        Value::Null
    } else {
        field.type_desc.zero_value()
    }
}

/// Sequence instance: element type plus items.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceValue {
    element_type: TypeHandle,
    items: Vec<Value>,
}

impl SequenceValue {
    pub fn new(element_type: &TypeHandle, items: Vec<Value>) -> Self {
        Self {
            element_type: element_type.clone(),
            items,
        }
    }

    pub fn empty(element_type: &TypeHandle) -> Self {
        Self::new(element_type, Vec::new())
    }

    pub fn element_type(&self) -> &TypeHandle {
        &self.element_type
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Value> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: Value) {
        self.items.push(item);
    }
}
