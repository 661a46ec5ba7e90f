// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Runtime type model for mapping
//!
//! Rust erases types at runtime, so the engine carries its own description of
//! every mappable type and a dynamic value representation to convert through.
//!
//! # Features
//!
//! - **TypeDescriptor**: Runtime type description (primitives, structs, sequences)
//! - **Value**: Dynamic value container with struct field access
//! - **Builder API**: Fluent interface for building struct descriptors
//! - **Shape**: Bridge from Rust types (`#[derive(Shape)]`) to descriptors and values
//! - **TypeCatalog**: Name-based type lookup
//!
//! # Example
//!
//! ```rust
//! use shapemap::types::{PrimitiveKind, StructValue, TypeDescriptorBuilder, Value};
//!
//! let reservation = TypeDescriptorBuilder::new("Reservation")
//!     .string_field("reservation_id")
//!     .field("guest_count", PrimitiveKind::I32)
//!     .build_handle();
//!
//! let value = StructValue::zeroed(&reservation).with("reservation_id", "R-1");
//! assert_eq!(value.get("guest_count"), Some(&Value::I32(0)));
//! assert!(reservation.instance_of(&Value::Struct(value)));
//! ```

mod builder;
mod catalog;
mod descriptor;
mod shape;
mod value;

pub use builder::TypeDescriptorBuilder;
pub use catalog::TypeCatalog;
pub use descriptor::{
    names_match, FieldDescriptor, PrimitiveKind, SequenceDescriptor, StructDescriptor,
    TypeDescriptor, TypeHandle, TypeKind,
};
pub use shape::{memoize, primitive_handle, Shape, ValueError};
pub use value::{Decimal, SequenceValue, StructValue, Value};
