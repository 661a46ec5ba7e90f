// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Type descriptors for runtime type information.

use crate::types::{Decimal, StructValue, Value};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Shared, immutable handle to a [`TypeDescriptor`].
pub type TypeHandle = Arc<TypeDescriptor>;

/// Scalar type kinds.
///
/// Every primitive kind is "simple": fields of these types are never mapped
/// through a nested conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
    String,
    Decimal,
    DateTime,
    Duration,
    Uuid,
}

impl PrimitiveKind {
    /// All primitive kinds, in declaration order.
    pub const ALL: [PrimitiveKind; 17] = [
        Self::Bool,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::F32,
        Self::F64,
        Self::Char,
        Self::String,
        Self::Decimal,
        Self::DateTime,
        Self::Duration,
        Self::Uuid,
    ];

    /// Short type name, as written in Rust source.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Char => "char",
            Self::String => "String",
            Self::Decimal => "Decimal",
            Self::DateTime => "DateTime",
            Self::Duration => "TimeDelta",
            Self::Uuid => "Uuid",
        }
    }

    /// Fully-qualified type name.
    pub fn qualified_name(&self) -> &'static str {
        match self {
            Self::String => "alloc::string::String",
            Self::Decimal => "shapemap::types::Decimal",
            Self::DateTime => "chrono::DateTime<chrono::Utc>",
            Self::Duration => "chrono::TimeDelta",
            Self::Uuid => "uuid::Uuid",
            other => other.type_name(),
        }
    }

    /// Check if this is an integer or floating point kind.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::U8
                | Self::U16
                | Self::U32
                | Self::U64
                | Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::F32
                | Self::F64
                | Self::Decimal
        )
    }

    /// Zero value for this kind.
    pub fn zero_value(&self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::U8 => Value::U8(0),
            Self::U16 => Value::U16(0),
            Self::U32 => Value::U32(0),
            Self::U64 => Value::U64(0),
            Self::I8 => Value::I8(0),
            Self::I16 => Value::I16(0),
            Self::I32 => Value::I32(0),
            Self::I64 => Value::I64(0),
            Self::F32 => Value::F32(0.0),
            Self::F64 => Value::F64(0.0),
            Self::Char => Value::Char('\0'),
            Self::String => Value::String(String::new()),
            Self::Decimal => Value::Decimal(Decimal::ZERO),
            Self::DateTime => Value::DateTime(chrono::DateTime::<chrono::Utc>::default()),
            Self::Duration => Value::Duration(chrono::TimeDelta::zero()),
            Self::Uuid => Value::Uuid(uuid::Uuid::nil()),
        }
    }
}

/// Type kind enumeration.
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// Scalar value.
    Primitive(PrimitiveKind),
    /// Record with named fields.
    Struct(StructDescriptor),
    /// Homogeneous ordered sequence.
    Sequence(SequenceDescriptor),
}

/// A complete type descriptor.
///
/// Identity is the qualified name: two descriptors denote the same type iff
/// their qualified names are equal. Field layouts are not compared.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Short type name (`Reservation`).
    pub name: String,
    /// Fully-qualified type name (`travel::models::Reservation`).
    pub qualified_name: Arc<str>,
    /// Type kind.
    pub kind: TypeKind,
}

impl TypeDescriptor {
    /// Create a new type descriptor.
    pub fn new(
        name: impl Into<String>,
        qualified_name: impl Into<Arc<str>>,
        kind: TypeKind,
    ) -> Self {
        Self {
            name: name.into(),
            qualified_name: qualified_name.into(),
            kind,
        }
    }

    /// Create a primitive type descriptor.
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::new(
            kind.type_name(),
            kind.qualified_name(),
            TypeKind::Primitive(kind),
        )
    }

    /// Create a sequence type descriptor (`Vec<element>`).
    pub fn sequence(element_type: TypeHandle) -> Self {
        let name = format!("Vec<{}>", element_type.name);
        let qualified = format!("Vec<{}>", element_type.qualified_name);
        Self::new(
            name,
            qualified,
            TypeKind::Sequence(SequenceDescriptor::new(element_type)),
        )
    }

    /// Create a struct type descriptor.
    pub fn struct_type(
        name: impl Into<String>,
        qualified_name: impl Into<Arc<str>>,
        fields: Vec<FieldDescriptor>,
        constructible: bool,
    ) -> Self {
        Self::new(
            name,
            qualified_name,
            TypeKind::Struct(StructDescriptor {
                fields,
                constructible,
            }),
        )
    }

    /// Check if this is a primitive type.
    pub fn is_primitive(&self) -> bool {
        matches!(self.kind, TypeKind::Primitive(_))
    }

    /// Check if this is a struct type.
    pub fn is_struct(&self) -> bool {
        matches!(self.kind, TypeKind::Struct(_))
    }

    /// Check if this is a sequence type.
    pub fn is_sequence(&self) -> bool {
        matches!(self.kind, TypeKind::Sequence(_))
    }

    /// Complex types are mapped field-by-field through a nested conversion.
    pub fn is_complex(&self) -> bool {
        !self.is_primitive()
    }

    /// Get the primitive kind, if any.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self.kind {
            TypeKind::Primitive(kind) => Some(kind),
            _ => None,
        }
    }

    /// Whether a fresh, zero-filled instance can be created for this type.
    pub fn has_default_constructor(&self) -> bool {
        matches!(&self.kind, TypeKind::Struct(s) if s.constructible)
    }

    /// Struct fields (empty for non-struct types).
    pub fn fields(&self) -> &[FieldDescriptor] {
        match &self.kind {
            TypeKind::Struct(s) => &s.fields,
            _ => &[],
        }
    }

    /// Get field by exact name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Get field index by exact name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields().iter().position(|f| f.name == name)
    }

    /// Get field index by case-insensitive name.
    pub fn field_index_ignore_case(&self, name: &str) -> Option<usize> {
        self.fields()
            .iter()
            .position(|f| names_match(&f.name, name))
    }

    /// Element type if this is a sequence.
    pub fn element_type(&self) -> Option<&TypeHandle> {
        match &self.kind {
            TypeKind::Sequence(seq) => Some(&seq.element_type),
            _ => None,
        }
    }

    /// The value a conversion yields for an absent input.
    pub fn zero_value(&self) -> Value {
        match &self.kind {
            TypeKind::Primitive(kind) => kind.zero_value(),
            TypeKind::Struct(_) | TypeKind::Sequence(_) => Value::Null,
        }
    }

    /// Fresh instance with every field at its zero value.
    ///
    /// Returns `None` for types without a default constructor.
    pub fn instantiate(self: &Arc<Self>) -> Option<StructValue> {
        if !self.has_default_constructor() {
            return None;
        }
        Some(StructValue::zeroed(self))
    }

    /// Runtime "is instance of" check. `Null` is never an instance.
    pub fn instance_of(&self, value: &Value) -> bool {
        match (&self.kind, value) {
            (_, Value::Null) => false,
            (TypeKind::Primitive(kind), v) => v.primitive_kind() == Some(*kind),
            (TypeKind::Struct(_), Value::Struct(s)) => s.descriptor().as_ref() == self,
            (TypeKind::Sequence(seq), Value::Sequence(v)) => {
                v.element_type().as_ref() == seq.element_type.as_ref()
            }
            _ => false,
        }
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name == other.qualified_name
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualified_name.hash(state);
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Struct layout.
#[derive(Debug, Clone)]
pub struct StructDescriptor {
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
    /// Has a no-argument constructor.
    pub constructible: bool,
}

/// Field descriptor for struct members.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Field type.
    pub type_desc: TypeHandle,
    /// May hold `Null` (`Option<T>` in Rust).
    pub optional: bool,
    /// Publicly readable.
    pub readable: bool,
    /// Publicly writable.
    pub writable: bool,
}

impl FieldDescriptor {
    /// Create a new readable and writable field descriptor.
    pub fn new(name: impl Into<String>, type_desc: TypeHandle) -> Self {
        Self {
            name: name.into(),
            type_desc,
            optional: false,
            readable: true,
            writable: true,
        }
    }

    /// Mark as optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Mark as read-only (never assigned by conversions).
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Mark as write-only (never read by conversions).
    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }
}

/// Sequence type descriptor.
#[derive(Debug, Clone)]
pub struct SequenceDescriptor {
    /// Element type.
    pub element_type: TypeHandle,
}

impl SequenceDescriptor {
    /// Create sequence descriptor.
    pub fn new(element_type: TypeHandle) -> Self {
        Self { element_type }
    }
}

/// Case-insensitive name comparison used for field and type-name matching.
pub fn names_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> TypeHandle {
        let i32_type = Arc::new(TypeDescriptor::primitive(PrimitiveKind::I32));
        Arc::new(TypeDescriptor::struct_type(
            "Point",
            "geo::Point",
            vec![
                FieldDescriptor::new("x", i32_type.clone()),
                FieldDescriptor::new("Y", i32_type),
            ],
            true,
        ))
    }

    #[test]
    fn test_identity_is_qualified_name() {
        let a = point();
        let b = Arc::new(TypeDescriptor::struct_type("Point", "geo::Point", vec![], false));
        let c = Arc::new(TypeDescriptor::struct_type("Point", "other::Point", vec![], true));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_struct_fields() {
        let desc = point();
        assert!(desc.is_struct());
        assert!(desc.is_complex());
        assert!(desc.has_default_constructor());
        assert_eq!(desc.fields().len(), 2);
        assert_eq!(desc.field_index("x"), Some(0));
        assert_eq!(desc.field_index("y"), None);
        assert_eq!(desc.field_index_ignore_case("y"), Some(1));
    }

    #[test]
    fn test_sequence_names() {
        let seq = TypeDescriptor::sequence(point());
        assert_eq!(seq.name, "Vec<Point>");
        assert_eq!(&*seq.qualified_name, "Vec<geo::Point>");
        assert_eq!(seq.element_type().map(|e| e.name.as_str()), Some("Point"));
        assert_eq!(seq.zero_value(), Value::Null);
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(
            TypeDescriptor::primitive(PrimitiveKind::String).zero_value(),
            Value::String(String::new())
        );
        assert_eq!(
            TypeDescriptor::primitive(PrimitiveKind::I32).zero_value(),
            Value::I32(0)
        );
        assert_eq!(point().zero_value(), Value::Null);
    }

    #[test]
    fn test_instance_of() {
        let desc = point();
        let value = Value::Struct(StructValue::zeroed(&desc));
        assert!(desc.instance_of(&value));
        assert!(!desc.instance_of(&Value::Null));
        assert!(!desc.instance_of(&Value::I32(1)));

        let i32_type = TypeDescriptor::primitive(PrimitiveKind::I32);
        assert!(i32_type.instance_of(&Value::I32(7)));
        assert!(!i32_type.instance_of(&Value::I64(7)));
    }

    #[test]
    fn test_names_match() {
        assert!(names_match("GuestCount", "guestcount"));
        assert!(!names_match("id", "ids"));
    }
}
