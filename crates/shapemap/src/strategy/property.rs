// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Field-by-field conversion into a freshly constructed target.
//!
//! Building a converter computes a [`PropertyPlan`] once per pair: which
//! source field feeds which target field and whether the value is copied or
//! converted through a nested call. Running the converter only walks the plan.
//!
//! Matching rules:
//! - target fields are matched to source fields by name, ignoring case
//!   (an exact-case match is preferred when several source fields qualify);
//! - identical field types are copied;
//! - complex field types on both sides are converted through the active
//!   dispatcher, and a null source field stays null without a nested call;
//! - anything else is skipped and the target field keeps its zero value,
//!   unless [`PlanOptions::strict_fields`] is set.

use crate::engine::{CompiledConverter, MappingContext};
use crate::error::{MappingError, Result};
use crate::strategy::Strategy;
use crate::types::{names_match, FieldDescriptor, StructValue, TypeDescriptor, TypeHandle, Value};
use std::sync::Arc;

/// Options applied when building property plans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanOptions {
    /// Reject matched field pairs whose types cannot be converted.
    pub strict_fields: bool,
}

#[derive(Debug, Clone)]
enum FieldAction {
    /// Same type on both sides.
    Copy,
    /// Both sides complex; convert through the dispatcher.
    Nested {
        source: TypeHandle,
        target: TypeHandle,
    },
}

#[derive(Debug, Clone)]
struct FieldStep {
    source_index: usize,
    target_index: usize,
    /// Target field zero value, used when copying a null into a required field.
    fallback: Value,
    action: FieldAction,
}

/// Precomputed field mapping for one type pair.
#[derive(Debug, Clone)]
pub struct PropertyPlan {
    target: TypeHandle,
    steps: Vec<FieldStep>,
}

impl PropertyPlan {
    /// Plan the conversion of `source` into `target`.
    ///
    /// Fails if `target` cannot be constructed, or in strict mode when a
    /// matched field pair has incompatible types.
    pub fn build(source: &TypeHandle, target: &TypeHandle, options: PlanOptions) -> Result<Self> {
        if !target.has_default_constructor() {
            return Err(MappingError::compilation(
                source,
                target,
                format!("{} has no default constructor", target.name),
                None,
            ));
        }

        let mut steps = Vec::new();
        for (target_index, target_field) in target.fields().iter().enumerate() {
            if !target_field.writable {
                log::trace!("[property] {}.{} is read-only, skipped", target.name, target_field.name);
                continue;
            }
            let Some(source_index) = match_field(source, &target_field.name) else {
                log::trace!(
                    "[property] {}.{} has no source field, left at default",
                    target.name,
                    target_field.name
                );
                continue;
            };
            let source_field = &source.fields()[source_index];

            let action = if source_field.type_desc == target_field.type_desc {
                FieldAction::Copy
            } else if source_field.type_desc.is_complex() && target_field.type_desc.is_complex() {
                FieldAction::Nested {
                    source: Arc::clone(&source_field.type_desc),
                    target: Arc::clone(&target_field.type_desc),
                }
            } else if options.strict_fields {
                return Err(MappingError::compilation(
                    source,
                    target,
                    format!(
                        "field {}: {} is not convertible to {}",
                        target_field.name, source_field.type_desc.name, target_field.type_desc.name
                    ),
                    None,
                ));
            } else {
                log::trace!(
                    "[property] {}.{}: {} vs {}, skipped",
                    target.name,
                    target_field.name,
                    source_field.type_desc.name,
                    target_field.type_desc.name
                );
                continue;
            };

            steps.push(FieldStep {
                source_index,
                target_index,
                fallback: fallback(target_field),
                action,
            });
        }

        Ok(Self {
            target: Arc::clone(target),
            steps,
        })
    }

    /// Number of fields the plan assigns.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run the plan against a source value.
    pub fn execute(&self, ctx: &MappingContext<'_>, value: &Value) -> Result<Value> {
        let mut out = StructValue::zeroed(&self.target);
        let Some(source) = value.as_struct() else {
            return Ok(Value::Struct(out));
        };

        for step in &self.steps {
            let Some(field) = source.field_at(step.source_index) else {
                continue;
            };
            let converted = match (&step.action, field) {
                (_, Value::Null) => step.fallback.clone(),
                (FieldAction::Copy, v) => v.clone(),
                (FieldAction::Nested { source, target }, v) => ctx.map(v, source, target)?,
            };
            out.set_at(step.target_index, converted);
        }
        Ok(Value::Struct(out))
    }
}

/// Source field feeding `name`: exact case first, then case-insensitive.
fn match_field(source: &TypeDescriptor, name: &str) -> Option<usize> {
    let fields = source.fields();
    fields
        .iter()
        .position(|f| f.readable && f.name == name)
        .or_else(|| {
            fields
                .iter()
                .position(|f| f.readable && names_match(&f.name, name))
        })
}

fn fallback(field: &FieldDescriptor) -> Value {
    if field.optional {
        Value::Null
    } else {
        field.type_desc.zero_value()
    }
}

/// Converts into any constructible struct by matching field names.
#[derive(Debug, Default)]
pub struct PropertyStrategy {
    options: PlanOptions,
}

impl PropertyStrategy {
    #[must_use]
    pub fn new(options: PlanOptions) -> Self {
        Self { options }
    }
}

impl Strategy for PropertyStrategy {
    fn name(&self) -> &'static str {
        "property"
    }

    fn can_handle(&self, _source: &TypeHandle, target: &TypeHandle) -> bool {
        target.has_default_constructor()
    }

    fn build(&self, source: &TypeHandle, target: &TypeHandle) -> Result<CompiledConverter> {
        let plan = PropertyPlan::build(source, target, self.options)?;
        log::debug!(
            "[property] plan {} -> {}: {} field(s)",
            source.name,
            target.name,
            plan.len()
        );
        Ok(CompiledConverter::new(
            Arc::clone(source),
            Arc::clone(target),
            move |ctx, value| plan.execute(ctx, value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Dispatcher;
    use crate::types::{PrimitiveKind, TypeDescriptorBuilder};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Nested calls go straight back into a property plan for the pair.
    #[derive(Default)]
    struct PlanDispatcher {
        calls: AtomicUsize,
    }

    impl Dispatcher for PlanDispatcher {
        fn dispatch(
            &self,
            parent: &MappingContext<'_>,
            value: &Value,
            source: &TypeHandle,
            target: &TypeHandle,
        ) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let ctx = parent.enter(self)?;
            PropertyPlan::build(source, target, PlanOptions::default())?.execute(&ctx, value)
        }
    }

    fn partner_booking() -> TypeHandle {
        TypeDescriptorBuilder::new("PartnerBooking")
            .string_field("code")
            .string_field("name")
            .field("guests", PrimitiveKind::I32)
            .build_handle()
    }

    fn booking() -> TypeHandle {
        TypeDescriptorBuilder::new("Booking")
            .string_field("id")
            .string_field("Name")
            .field("guestCount", PrimitiveKind::I32)
            .build_handle()
    }

    #[test]
    fn test_unmatched_fields_keep_defaults() {
        let (source, target) = (partner_booking(), booking());
        let plan = PropertyPlan::build(&source, &target, PlanOptions::default());
        let plan = plan.ok().filter(|p| p.len() == 1);
        assert!(plan.is_some());

        let input = StructValue::zeroed(&source)
            .with("code", "GOO-1")
            .with("name", "alice")
            .with("guests", 2i32);
        let dispatcher = PlanDispatcher::default();
        let ctx = MappingContext::new(&dispatcher);
        let out = plan.map(|p| p.execute(&ctx, &Value::Struct(input)));
        let out = out.and_then(|r| r.ok());

        let expected = StructValue::zeroed(&target).with("Name", "alice");
        assert_eq!(out, Some(Value::Struct(expected)));
    }

    #[test]
    fn test_mismatched_primitive_skipped_or_rejected() {
        let source = TypeDescriptorBuilder::new("A")
            .field("count", PrimitiveKind::I64)
            .build_handle();
        let target = TypeDescriptorBuilder::new("B")
            .field("count", PrimitiveKind::I32)
            .build_handle();

        let lenient = PropertyPlan::build(&source, &target, PlanOptions::default());
        assert!(matches!(lenient, Ok(ref p) if p.is_empty()));

        let strict = PropertyPlan::build(&source, &target, PlanOptions { strict_fields: true });
        assert!(matches!(strict, Err(MappingError::Compilation { .. })));
    }

    #[test]
    fn test_nested_null_skips_dispatch() {
        let guest = TypeDescriptorBuilder::new("Guest").string_field("name").build_handle();
        let profile = TypeDescriptorBuilder::new("Profile").string_field("NAME").build_handle();
        let source = TypeDescriptorBuilder::new("Stay")
            .optional_field("guest", guest.clone())
            .build_handle();
        let target = TypeDescriptorBuilder::new("Visit")
            .optional_field("guest", profile.clone())
            .build_handle();

        let plan = PropertyPlan::build(&source, &target, PlanOptions::default());
        let Ok(plan) = plan else {
            panic!("plan should build");
        };
        let dispatcher = PlanDispatcher::default();
        let ctx = MappingContext::new(&dispatcher);

        let empty = plan.execute(&ctx, &Value::Struct(StructValue::zeroed(&source)));
        assert_eq!(dispatcher.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            empty.ok().as_ref().and_then(|v| v.get_field("guest")),
            Some(&Value::Null)
        );

        let present = StructValue::zeroed(&source).with(
            "guest",
            StructValue::zeroed(&guest).with("name", "bob"),
        );
        let out = plan.execute(&ctx, &Value::Struct(present));
        assert_eq!(dispatcher.calls.load(Ordering::SeqCst), 1);
        let expected = StructValue::zeroed(&profile).with("NAME", "bob");
        assert_eq!(
            out.ok().as_ref().and_then(|v| v.get_field("guest")),
            Some(&Value::Struct(expected))
        );
    }

    #[test]
    fn test_access_flags_respected() {
        let source = TypeDescriptorBuilder::new("A")
            .write_only_field("secret", PrimitiveKind::String)
            .string_field("created")
            .build_handle();
        let target = TypeDescriptorBuilder::new("B")
            .string_field("secret")
            .read_only_field("created", PrimitiveKind::String)
            .build_handle();

        let plan = PropertyPlan::build(&source, &target, PlanOptions::default());
        assert!(matches!(plan, Ok(ref p) if p.is_empty()));
    }

    #[test]
    fn test_exact_case_preferred() {
        let source = TypeDescriptorBuilder::new("A")
            .string_field("ID")
            .string_field("id")
            .build_handle();
        let target = TypeDescriptorBuilder::new("B").string_field("id").build_handle();

        let input = StructValue::zeroed(&source).with("ID", "upper").with("id", "lower");
        let dispatcher = PlanDispatcher::default();
        let ctx = MappingContext::new(&dispatcher);
        let out = PropertyPlan::build(&source, &target, PlanOptions::default())
            .and_then(|p| p.execute(&ctx, &Value::Struct(input)));
        assert_eq!(
            out.ok().as_ref().and_then(|v| v.get_field("id")).and_then(Value::as_str),
            Some("lower")
        );
    }

    #[test]
    fn test_strategy_requires_constructible_target() {
        let strategy = PropertyStrategy::default();
        let source = TypeDescriptorBuilder::new("A").build_handle();
        let open = TypeDescriptorBuilder::new("B").build_handle();
        let sealed = TypeDescriptorBuilder::new("C").no_default_constructor().build_handle();
        assert!(strategy.can_handle(&source, &open));
        assert!(!strategy.can_handle(&source, &sealed));
        assert!(!strategy.can_handle(&source, &crate::types::primitive_handle(PrimitiveKind::I32)));
    }
}
