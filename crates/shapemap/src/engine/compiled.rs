// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Compiled, type-erased conversion functions.

use crate::engine::context::MappingContext;
use crate::error::Result;
use crate::types::{TypeHandle, Value};
use std::fmt;
use std::sync::Arc;

/// Signature shared by every compiled conversion.
pub type ConvertFn = dyn Fn(&MappingContext<'_>, &Value) -> Result<Value> + Send + Sync;

/// An executable conversion for one type pair.
///
/// Immutable once built; shared by the compiled cache and every mapper that
/// wraps it.
#[derive(Clone)]
pub struct CompiledConverter {
    source: TypeHandle,
    target: TypeHandle,
    func: Arc<ConvertFn>,
}

impl CompiledConverter {
    pub fn new<F>(source: TypeHandle, target: TypeHandle, func: F) -> Self
    where
        F: Fn(&MappingContext<'_>, &Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            source,
            target,
            func: Arc::new(func),
        }
    }

    /// Declared source type.
    pub fn source(&self) -> &TypeHandle {
        &self.source
    }

    /// Declared result type.
    pub fn target(&self) -> &TypeHandle {
        &self.target
    }

    /// Run the conversion.
    #[inline]
    pub fn invoke(&self, ctx: &MappingContext<'_>, value: &Value) -> Result<Value> {
        (self.func)(ctx, value)
    }
}

impl fmt::Debug for CompiledConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledConverter")
            .field("source", &self.source.name)
            .field("target", &self.target.name)
            .finish_non_exhaustive()
    }
}
