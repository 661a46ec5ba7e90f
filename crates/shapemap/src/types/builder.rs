// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Fluent builder API for struct TypeDescriptors.

use crate::types::{FieldDescriptor, PrimitiveKind, TypeDescriptor, TypeHandle};
use std::sync::Arc;

/// Builder for creating struct [`TypeDescriptor`] instances at runtime.
///
/// ```
/// use shapemap::types::{PrimitiveKind, TypeDescriptorBuilder};
///
/// let guest = TypeDescriptorBuilder::new("GuestProfile")
///     .qualified_name("travel::GuestProfile")
///     .string_field("guest_id")
///     .string_field("full_name")
///     .field("loyalty_points", PrimitiveKind::U32)
///     .build();
///
/// assert_eq!(guest.fields().len(), 3);
/// assert!(guest.has_default_constructor());
/// ```
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    name: String,
    qualified_name: Option<String>,
    fields: Vec<FieldDescriptor>,
    constructible: bool,
}

impl TypeDescriptorBuilder {
    /// Create a new builder for a struct type.
    ///
    /// The qualified name defaults to the short name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualified_name: None,
            fields: Vec::new(),
            constructible: true,
        }
    }

    /// Set the fully-qualified name used for type identity.
    pub fn qualified_name(mut self, qualified_name: impl Into<String>) -> Self {
        self.qualified_name = Some(qualified_name.into());
        self
    }

    /// Mark the type as lacking a no-argument constructor.
    pub fn no_default_constructor(mut self) -> Self {
        self.constructible = false;
        self
    }

    /// Add a primitive field.
    pub fn field(self, name: impl Into<String>, kind: PrimitiveKind) -> Self {
        self.field_with_type(name, primitive(kind))
    }

    /// Add a field with a type descriptor.
    pub fn field_with_type(mut self, name: impl Into<String>, type_desc: TypeHandle) -> Self {
        self.fields.push(FieldDescriptor::new(name, type_desc));
        self
    }

    /// Add a field descriptor as-is.
    pub fn field_descriptor(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a string field.
    pub fn string_field(self, name: impl Into<String>) -> Self {
        self.field(name, PrimitiveKind::String)
    }

    /// Add a nested struct field.
    pub fn nested_field(self, name: impl Into<String>, nested: TypeHandle) -> Self {
        self.field_with_type(name, nested)
    }

    /// Add an optional nested field (`Option<T>`).
    pub fn optional_field(mut self, name: impl Into<String>, type_desc: TypeHandle) -> Self {
        self.fields
            .push(FieldDescriptor::new(name, type_desc).optional());
        self
    }

    /// Add a sequence field.
    pub fn sequence_field(self, name: impl Into<String>, element_type: TypeHandle) -> Self {
        self.field_with_type(name, Arc::new(TypeDescriptor::sequence(element_type)))
    }

    /// Add a primitive field that conversions read but never assign.
    pub fn read_only_field(mut self, name: impl Into<String>, kind: PrimitiveKind) -> Self {
        self.fields
            .push(FieldDescriptor::new(name, primitive(kind)).read_only());
        self
    }

    /// Add a primitive field that conversions assign but never read.
    pub fn write_only_field(mut self, name: impl Into<String>, kind: PrimitiveKind) -> Self {
        self.fields
            .push(FieldDescriptor::new(name, primitive(kind)).write_only());
        self
    }

    /// Build the TypeDescriptor.
    pub fn build(self) -> TypeDescriptor {
        let qualified = self.qualified_name.unwrap_or_else(|| self.name.clone());
        TypeDescriptor::struct_type(self.name, qualified, self.fields, self.constructible)
    }

    /// Build straight into a shared handle.
    pub fn build_handle(self) -> TypeHandle {
        Arc::new(self.build())
    }
}

fn primitive(kind: PrimitiveKind) -> TypeHandle {
    crate::types::primitive_handle(kind)
}
