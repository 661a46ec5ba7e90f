// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Ready-to-invoke mappers held by the registry.

use crate::engine::compiled::CompiledConverter;
use crate::engine::context::MappingContext;
use crate::error::Result;
use crate::types::{Shape, TypeHandle, Value};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A conversion for one type pair, as exposed to callers.
pub trait Mapper: Send + Sync {
    /// Declared source type.
    fn source(&self) -> &TypeHandle;

    /// Declared target type.
    fn target(&self) -> &TypeHandle;

    /// Convert a non-null instance of [`Mapper::source`].
    fn map(&self, ctx: &MappingContext<'_>, value: &Value) -> Result<Value>;
}

/// Mapper backed by a compiled converter.
#[derive(Debug, Clone)]
pub struct CompiledMapper {
    converter: Arc<CompiledConverter>,
}

impl CompiledMapper {
    #[must_use]
    pub fn new(converter: Arc<CompiledConverter>) -> Self {
        Self { converter }
    }

    pub fn converter(&self) -> &Arc<CompiledConverter> {
        &self.converter
    }
}

impl Mapper for CompiledMapper {
    fn source(&self) -> &TypeHandle {
        self.converter.source()
    }

    fn target(&self) -> &TypeHandle {
        self.converter.target()
    }

    fn map(&self, ctx: &MappingContext<'_>, value: &Value) -> Result<Value> {
        self.converter.invoke(ctx, value)
    }
}

/// Mapper backed by a hand-supplied typed closure.
pub struct FnMapper<S, T> {
    source: TypeHandle,
    target: TypeHandle,
    func: Box<dyn Fn(S) -> T + Send + Sync>,
}

impl<S: Shape, T: Shape> FnMapper<S, T> {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(S) -> T + Send + Sync + 'static,
    {
        Self {
            source: S::descriptor(),
            target: T::descriptor(),
            func: Box::new(func),
        }
    }
}

impl<S: Shape, T: Shape> Mapper for FnMapper<S, T> {
    fn source(&self) -> &TypeHandle {
        &self.source
    }

    fn target(&self) -> &TypeHandle {
        &self.target
    }

    fn map(&self, _ctx: &MappingContext<'_>, value: &Value) -> Result<Value> {
        let input = S::from_value(value.clone())?;
        Ok((self.func)(input).to_value())
    }
}

impl<S, T> fmt::Debug for FnMapper<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMapper")
            .field("source", &self.source.name)
            .field("target", &self.target.name)
            .finish_non_exhaustive()
    }
}

/// Typed view over a type-erased mapper.
pub struct TypedMapper<S, T> {
    inner: Arc<dyn Mapper>,
    _marker: PhantomData<fn(&S) -> T>,
}

impl<S: Shape, T: Shape> TypedMapper<S, T> {
    pub(crate) fn new(inner: Arc<dyn Mapper>) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    /// Convert `source`. An absent input yields the target's zero value.
    pub fn map(&self, ctx: &MappingContext<'_>, source: &S) -> Result<T> {
        let value = source.to_value();
        let out = if value.is_null() {
            self.inner.target().zero_value()
        } else {
            self.inner.map(ctx, &value)?
        };
        Ok(T::from_value(out)?)
    }

    /// The underlying type-erased mapper.
    pub fn inner(&self) -> &Arc<dyn Mapper> {
        &self.inner
    }
}

impl<S, T> Clone for TypedMapper<S, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _marker: PhantomData,
        }
    }
}

impl<S, T> fmt::Debug for TypedMapper<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedMapper")
            .field("source", &self.inner.source().name)
            .field("target", &self.inner.target().name)
            .finish()
    }
}
