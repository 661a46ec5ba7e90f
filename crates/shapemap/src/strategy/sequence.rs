// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Element-wise conversion of sequences.

use crate::engine::CompiledConverter;
use crate::error::{MappingError, Result};
use crate::strategy::Strategy;
use crate::types::{SequenceValue, TypeHandle, Value};
use std::sync::Arc;

/// Claims `Vec<A> -> Vec<B>`; each element goes through the dispatcher.
#[derive(Debug, Default)]
pub struct SequenceStrategy;

impl Strategy for SequenceStrategy {
    fn name(&self) -> &'static str {
        "sequence"
    }

    fn can_handle(&self, source: &TypeHandle, target: &TypeHandle) -> bool {
        source.is_sequence() && target.is_sequence()
    }

    fn build(&self, source: &TypeHandle, target: &TypeHandle) -> Result<CompiledConverter> {
        let (Some(source_elem), Some(target_elem)) = (source.element_type(), target.element_type())
        else {
            return Err(MappingError::compilation(
                source,
                target,
                "both types must be sequences",
                None,
            ));
        };
        let source_elem = Arc::clone(source_elem);
        let target_elem = Arc::clone(target_elem);
        let (source_type, target_type) = (Arc::clone(source), Arc::clone(target));

        Ok(CompiledConverter::new(
            Arc::clone(source),
            Arc::clone(target),
            move |ctx, value| match value {
                Value::Null => Ok(Value::Null),
                Value::Sequence(items) => {
                    let converted = items
                        .iter()
                        .map(|item| ctx.map(item, &source_elem, &target_elem))
                        .collect::<Result<Vec<_>>>()?;
                    Ok(Value::Sequence(SequenceValue::new(&target_elem, converted)))
                }
                other => Err(MappingError::conversion(
                    &source_type,
                    &target_type,
                    format!("expected a sequence, got {}", other.type_name()),
                )),
            },
        ))
    }
}
