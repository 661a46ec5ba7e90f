// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Per-call dispatch context.
//!
//! Every converter receives the context of the call that invoked it. Nested
//! conversions (struct fields, sequence elements) re-enter the engine through
//! [`MappingContext::map`], which hands the active dispatcher a reference to
//! the current context so it can derive a child one. Contexts are plain
//! stack values: leaving a call, by success or by error, drops its context
//! and the caller's context is exactly what it was before.

use crate::error::{MappingError, Result};
use crate::types::{Shape, TypeHandle, Value};
use std::fmt;

/// Nesting depth at which a conversion is aborted.
pub const MAX_DEPTH: usize = 128;

/// The engine entry point that nested conversions re-enter.
pub trait Dispatcher {
    /// Convert `value` from `source` to `target` on behalf of `parent`.
    fn dispatch(
        &self,
        parent: &MappingContext<'_>,
        value: &Value,
        source: &TypeHandle,
        target: &TypeHandle,
    ) -> Result<Value>;
}

/// Active dispatcher plus nesting depth for one logical call chain.
#[derive(Clone, Copy)]
pub struct MappingContext<'a> {
    dispatcher: &'a dyn Dispatcher,
    depth: usize,
}

impl<'a> MappingContext<'a> {
    /// Top-level context for a call on `dispatcher`.
    pub fn new(dispatcher: &'a dyn Dispatcher) -> Self {
        Self {
            dispatcher,
            depth: 0,
        }
    }

    /// Child context with `dispatcher` active, one level deeper.
    pub fn enter<'b>(&self, dispatcher: &'b dyn Dispatcher) -> Result<MappingContext<'b>> {
        let depth = self.depth + 1;
        if depth > MAX_DEPTH {
            return Err(MappingError::invalid_argument(format!(
                "Maximum mapping depth {MAX_DEPTH} exceeded"
            )));
        }
        Ok(MappingContext { dispatcher, depth })
    }

    /// The dispatcher active for this call.
    pub fn dispatcher(&self) -> &'a dyn Dispatcher {
        self.dispatcher
    }

    /// Nesting depth; `0` for a top-level call.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Convert a nested value through the active dispatcher.
    pub fn map(&self, value: &Value, source: &TypeHandle, target: &TypeHandle) -> Result<Value> {
        self.dispatcher.dispatch(self, value, source, target)
    }

    /// Typed variant of [`MappingContext::map`], for hand-written mappers.
    pub fn map_typed<S: Shape, T: Shape>(&self, source: &S) -> Result<T> {
        let value = self.map(&source.to_value(), &S::descriptor(), &T::descriptor())?;
        Ok(T::from_value(value)?)
    }
}

impl fmt::Debug for MappingContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingContext")
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}
