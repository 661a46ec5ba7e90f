// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Bridge between compile-time Rust types and the runtime type model.
//!
//! `#[derive(Shape)]` (feature `derive`) generates these impls for structs
//! with named fields; scalars, `String`, `Vec<T>` and `Option<T>` are covered
//! here.

use crate::types::{
    Decimal, PrimitiveKind, SequenceValue, TypeDescriptor, TypeHandle, Value,
};
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use std::any::TypeId;
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use uuid::Uuid;

/// Errors decoding a [`Value`] into a typed Rust value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("null value for non-optional {type_name}")]
    UnexpectedNull { type_name: String },

    #[error("field `{field}` missing from {type_name} value")]
    MissingField { type_name: String, field: String },
}

/// A Rust type with a runtime descriptor.
///
/// `to_value`/`from_value` must agree with `descriptor()`: the value produced
/// by `to_value` is an instance of the descriptor (or `Null` for absent
/// optionals).
pub trait Shape: Sized + 'static {
    /// Runtime descriptor for this type.
    fn descriptor() -> TypeHandle;

    /// Convert to a dynamic value.
    fn to_value(&self) -> Value;

    /// Decode from a dynamic value.
    fn from_value(value: Value) -> Result<Self, ValueError>;
}

/// Memoize the descriptor of `T`, building it at most once per winner.
///
/// The build closure runs outside any map lock, so it may itself call
/// `memoize` for field types.
pub fn memoize<T: 'static>(build: impl FnOnce() -> TypeDescriptor) -> TypeHandle {
    static DESCRIPTORS: OnceLock<DashMap<TypeId, TypeHandle>> = OnceLock::new();
    let descriptors = DESCRIPTORS.get_or_init(DashMap::new);
    let id = TypeId::of::<T>();

    if let Some(hit) = descriptors.get(&id) {
        return Arc::clone(hit.value());
    }

    let built = Arc::new(build());
    let entry = descriptors.entry(id).or_insert(built);
    Arc::clone(entry.value())
}

/// Shared descriptor for a primitive kind.
pub fn primitive_handle(kind: PrimitiveKind) -> TypeHandle {
    static PRIMITIVES: OnceLock<Vec<TypeHandle>> = OnceLock::new();
    let primitives = PRIMITIVES.get_or_init(|| {
        PrimitiveKind::ALL
            .iter()
            .map(|k| Arc::new(TypeDescriptor::primitive(*k)))
            .collect()
    });
    // ALL is in declaration order, so the discriminant is the index.
    Arc::clone(&primitives[kind as usize])
}

macro_rules! scalar_shape {
    ($ty:ty, $kind:ident, $zero:expr) => {
        impl Shape for $ty {
            fn descriptor() -> TypeHandle {
                primitive_handle(PrimitiveKind::$kind)
            }

            fn to_value(&self) -> Value {
                Value::$kind(Clone::clone(self))
            }

            fn from_value(value: Value) -> Result<Self, ValueError> {
                match value {
                    Value::$kind(v) => Ok(v),
                    Value::Null => Ok($zero),
                    other => Err(ValueError::TypeMismatch {
                        expected: PrimitiveKind::$kind.type_name().to_string(),
                        got: other.type_name(),
                    }),
                }
            }
        }
    };
}

scalar_shape!(bool, Bool, false);
scalar_shape!(u8, U8, 0);
scalar_shape!(u16, U16, 0);
scalar_shape!(u32, U32, 0);
scalar_shape!(u64, U64, 0);
scalar_shape!(i8, I8, 0);
scalar_shape!(i16, I16, 0);
scalar_shape!(i32, I32, 0);
scalar_shape!(i64, I64, 0);
scalar_shape!(f32, F32, 0.0);
scalar_shape!(f64, F64, 0.0);
scalar_shape!(char, Char, '\0');
scalar_shape!(String, String, String::new());
scalar_shape!(Decimal, Decimal, Decimal::ZERO);
scalar_shape!(DateTime<Utc>, DateTime, DateTime::<Utc>::default());
scalar_shape!(TimeDelta, Duration, TimeDelta::zero());
scalar_shape!(Uuid, Uuid, Uuid::nil());

impl<T: Shape> Shape for Vec<T> {
    fn descriptor() -> TypeHandle {
        memoize::<Self>(|| TypeDescriptor::sequence(T::descriptor()))
    }

    fn to_value(&self) -> Value {
        let items = self.iter().map(Shape::to_value).collect();
        Value::Sequence(SequenceValue::new(&T::descriptor(), items))
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Sequence(seq) => seq.into_items().into_iter().map(T::from_value).collect(),
            Value::Null => Ok(Vec::new()),
            other => Err(ValueError::TypeMismatch {
                expected: Self::descriptor().name.clone(),
                got: other.type_name(),
            }),
        }
    }
}

/// `None` is the absent value; the descriptor is the inner type's.
impl<T: Shape> Shape for Option<T> {
    fn descriptor() -> TypeHandle {
        T::descriptor()
    }

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            v => T::from_value(v).map(Some),
        }
    }
}
