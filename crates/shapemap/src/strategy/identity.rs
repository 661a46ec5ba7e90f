// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Same-type conversion: pass-through for scalars, deep copy for structs.

use crate::engine::CompiledConverter;
use crate::error::{MappingError, Result};
use crate::strategy::{PlanOptions, PropertyPlan, Strategy};
use crate::types::TypeHandle;
use std::sync::Arc;

/// Claims `T -> T` for scalars and for structs with a default constructor.
///
/// Sequences are left to the sequence strategy so elements get copied
/// through their own conversions. Unconstructible structs fall through to
/// later strategies, where an explicit override can still claim them.
#[derive(Debug, Default)]
pub struct IdentityStrategy {
    options: PlanOptions,
}

impl IdentityStrategy {
    #[must_use]
    pub fn new(options: PlanOptions) -> Self {
        Self { options }
    }
}

impl Strategy for IdentityStrategy {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn can_handle(&self, source: &TypeHandle, target: &TypeHandle) -> bool {
        source == target
            && !source.is_sequence()
            && (source.is_primitive() || source.has_default_constructor())
    }

    fn build(&self, source: &TypeHandle, target: &TypeHandle) -> Result<CompiledConverter> {
        if source.is_primitive() {
            return Ok(CompiledConverter::new(
                Arc::clone(source),
                Arc::clone(target),
                |_, value| Ok(value.clone()),
            ));
        }

        if !target.has_default_constructor() {
            return Err(MappingError::compilation(
                source,
                target,
                format!("cannot copy {}: no default constructor", target.name),
                None,
            ));
        }
        let plan = PropertyPlan::build(source, target, self.options)?;
        Ok(CompiledConverter::new(
            Arc::clone(source),
            Arc::clone(target),
            move |ctx, value| plan.execute(ctx, value),
        ))
    }
}
