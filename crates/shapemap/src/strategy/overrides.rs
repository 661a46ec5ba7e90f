// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Hand-written conversions that take priority over conventions.
//!
//! Overrides are looked up through an [`OverrideProvider`]. The strategy asks
//! the provider on every resolution, and the compiled converter asks again on
//! every call, so a provider scoped narrower than the engine (see
//! [`LayeredOverrides`]) is honoured and scoped mappers get a fresh instance
//! per conversion.

use crate::engine::{CompiledConverter, MappingContext, TypePairKey};
use crate::error::{MappingError, Result};
use crate::strategy::Strategy;
use crate::types::{Shape, TypeDescriptor, TypeHandle, Value};
use dashmap::DashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A hand-written conversion from `S` to `T`.
///
/// Nested conversions can go back through the engine with
/// [`MappingContext::map_typed`].
pub trait TypeMapper<S, T>: Send + Sync {
    fn map(&self, ctx: &MappingContext<'_>, source: S) -> Result<T>;
}

/// How often an override instance is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideLifetime {
    /// One instance shared by every call.
    Singleton,
    /// A fresh instance for every conversion call.
    Scoped,
}

/// Type-erased [`TypeMapper`].
trait ErasedMapper: Send + Sync {
    fn map_value(&self, ctx: &MappingContext<'_>, value: &Value) -> Result<Value>;
}

struct Erased<M, S, T> {
    mapper: M,
    _marker: PhantomData<fn(S) -> T>,
}

impl<M, S, T> ErasedMapper for Erased<M, S, T>
where
    M: TypeMapper<S, T>,
    S: Shape,
    T: Shape,
{
    fn map_value(&self, ctx: &MappingContext<'_>, value: &Value) -> Result<Value> {
        let source = S::from_value(value.clone())?;
        Ok(self.mapper.map(ctx, source)?.to_value())
    }
}

fn erase<M, S, T>(mapper: M) -> Box<dyn ErasedMapper>
where
    M: TypeMapper<S, T> + 'static,
    S: Shape,
    T: Shape,
{
    Box::new(Erased {
        mapper,
        _marker: PhantomData,
    })
}

/// Closure adapter for [`OverrideRegistry::register`].
struct FnTypeMapper<F>(F);

impl<S, T, F> TypeMapper<S, T> for FnTypeMapper<F>
where
    F: Fn(S) -> T + Send + Sync,
{
    fn map(&self, _ctx: &MappingContext<'_>, source: S) -> Result<T> {
        Ok((self.0)(source))
    }
}

type MakeMapper = dyn Fn() -> Box<dyn ErasedMapper> + Send + Sync;

#[derive(Clone)]
enum Instance {
    Singleton(Arc<dyn ErasedMapper>),
    Scoped(Arc<MakeMapper>),
}

/// A registered override for one type pair.
#[derive(Clone)]
pub struct OverrideEntry {
    source: TypeHandle,
    target: TypeHandle,
    instance: Instance,
}

impl OverrideEntry {
    pub fn source(&self) -> &TypeHandle {
        &self.source
    }

    pub fn target(&self) -> &TypeHandle {
        &self.target
    }

    pub fn lifetime(&self) -> OverrideLifetime {
        match self.instance {
            Instance::Singleton(_) => OverrideLifetime::Singleton,
            Instance::Scoped(_) => OverrideLifetime::Scoped,
        }
    }

    /// Run the override on a non-null source value.
    pub fn invoke(&self, ctx: &MappingContext<'_>, value: &Value) -> Result<Value> {
        match &self.instance {
            Instance::Singleton(mapper) => mapper.map_value(ctx, value),
            Instance::Scoped(make) => make().map_value(ctx, value),
        }
    }
}

impl fmt::Debug for OverrideEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverrideEntry")
            .field("source", &self.source.name)
            .field("target", &self.target.name)
            .field("lifetime", &self.lifetime())
            .finish()
    }
}

/// Answers "is there a hand-written conversion for this exact pair?".
pub trait OverrideProvider: Send + Sync {
    fn resolve(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> Option<OverrideEntry>;
}

/// Concurrent override table.
///
/// Registering a pair again replaces the earlier override. Compiled override
/// converters resolve on every call, so the replacement applies immediately.
#[derive(Default)]
pub struct OverrideRegistry {
    entries: DashMap<TypePairKey, OverrideEntry>,
}

impl OverrideRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a closure as a singleton override.
    pub fn register<S, T, F>(&self, func: F) -> &Self
    where
        S: Shape,
        T: Shape,
        F: Fn(S) -> T + Send + Sync + 'static,
    {
        self.register_mapper::<S, T, _>(FnTypeMapper(func))
    }

    /// Register a [`TypeMapper`] instance shared by every call.
    pub fn register_mapper<S, T, M>(&self, mapper: M) -> &Self
    where
        S: Shape,
        T: Shape,
        M: TypeMapper<S, T> + 'static,
    {
        let instance = Instance::Singleton(Arc::from(erase::<M, S, T>(mapper)));
        self.insert::<S, T>(instance)
    }

    /// Register a [`TypeMapper`] factory; each conversion gets a new instance.
    pub fn register_scoped<S, T, M, F>(&self, factory: F) -> &Self
    where
        S: Shape,
        T: Shape,
        M: TypeMapper<S, T> + 'static,
        F: Fn() -> M + Send + Sync + 'static,
    {
        let make: Arc<MakeMapper> = Arc::new(move || erase::<M, S, T>(factory()));
        self.insert::<S, T>(Instance::Scoped(make))
    }

    #[must_use]
    pub fn contains(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        self.entries
            .contains_key(&TypePairKey::new(source, target))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert<S: Shape, T: Shape>(&self, instance: Instance) -> &Self {
        let (source, target) = (S::descriptor(), T::descriptor());
        log::debug!("[overrides] registered {} -> {}", source.name, target.name);
        self.entries.insert(
            TypePairKey::new(&source, &target),
            OverrideEntry {
                source,
                target,
                instance,
            },
        );
        self
    }
}

impl OverrideProvider for OverrideRegistry {
    fn resolve(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> Option<OverrideEntry> {
        self.entries
            .get(&TypePairKey::new(source, target))
            .map(|e| e.value().clone())
    }
}

impl fmt::Debug for OverrideRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverrideRegistry")
            .field("entries", &self.entries.len())
            .finish()
    }
}

/// A narrower scope consulted before its parent.
#[derive(Clone)]
pub struct LayeredOverrides {
    scope: Arc<dyn OverrideProvider>,
    parent: Arc<dyn OverrideProvider>,
}

impl LayeredOverrides {
    pub fn new(scope: Arc<dyn OverrideProvider>, parent: Arc<dyn OverrideProvider>) -> Self {
        Self { scope, parent }
    }
}

impl OverrideProvider for LayeredOverrides {
    fn resolve(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> Option<OverrideEntry> {
        self.scope
            .resolve(source, target)
            .or_else(|| self.parent.resolve(source, target))
    }
}

impl fmt::Debug for LayeredOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredOverrides").finish_non_exhaustive()
    }
}

/// Claims pairs the provider has an override for.
pub struct ExplicitOverrideStrategy {
    provider: Arc<dyn OverrideProvider>,
}

impl ExplicitOverrideStrategy {
    pub fn new(provider: Arc<dyn OverrideProvider>) -> Self {
        Self { provider }
    }
}

impl fmt::Debug for ExplicitOverrideStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExplicitOverrideStrategy").finish_non_exhaustive()
    }
}

impl Strategy for ExplicitOverrideStrategy {
    fn name(&self) -> &'static str {
        "explicit-override"
    }

    fn can_handle(&self, source: &TypeHandle, target: &TypeHandle) -> bool {
        self.provider.resolve(source, target).is_some()
    }

    fn build(&self, source: &TypeHandle, target: &TypeHandle) -> Result<CompiledConverter> {
        let provider = Arc::clone(&self.provider);
        let (source_type, target_type) = (Arc::clone(source), Arc::clone(target));

        Ok(CompiledConverter::new(
            Arc::clone(source),
            Arc::clone(target),
            move |ctx, value| {
                let entry = provider.resolve(&source_type, &target_type).ok_or_else(|| {
                    MappingError::conversion(
                        &source_type,
                        &target_type,
                        "explicit mapper is no longer registered",
                    )
                })?;
                let out = entry.invoke(ctx, value)?;
                if !out.is_null() && !target_type.instance_of(&out) {
                    return Err(MappingError::conversion(
                        &source_type,
                        &target_type,
                        format!("explicit mapper returned {}", out.type_name()),
                    ));
                }
                Ok(out)
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Dispatcher;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NoNesting;

    impl Dispatcher for NoNesting {
        fn dispatch(
            &self,
            _parent: &MappingContext<'_>,
            _value: &Value,
            _source: &TypeHandle,
            _target: &TypeHandle,
        ) -> Result<Value> {
            Err(MappingError::invalid_argument("unexpected nested call"))
        }
    }

    static CREATED: AtomicUsize = AtomicUsize::new(0);

    struct Counting;

    impl Counting {
        fn new() -> Self {
            CREATED.fetch_add(1, Ordering::SeqCst);
            Self
        }
    }

    impl TypeMapper<String, u32> for Counting {
        fn map(&self, _ctx: &MappingContext<'_>, source: String) -> Result<u32> {
            Ok(source.chars().count() as u32)
        }
    }

    #[test]
    fn test_closure_override() {
        let registry = OverrideRegistry::new();
        registry.register(|s: String| s.to_uppercase());

        let text = String::descriptor();
        let entry = registry.resolve(&text, &text);
        assert!(matches!(entry, Some(ref e) if e.lifetime() == OverrideLifetime::Singleton));

        let ctx = MappingContext::new(&NoNesting);
        let out = entry.map(|e| e.invoke(&ctx, &Value::from("abc")));
        assert_eq!(out.and_then(|r| r.ok()), Some(Value::from("ABC")));
    }

    #[test]
    fn test_scoped_creates_per_call() {
        let registry = OverrideRegistry::new();
        registry.register_scoped::<String, u32, _, _>(Counting::new);

        let strategy = ExplicitOverrideStrategy::new(Arc::new(registry));
        let (text, uint) = (String::descriptor(), u32::descriptor());
        assert!(strategy.can_handle(&text, &uint));

        let conv = match strategy.build(&text, &uint) {
            Ok(c) => c,
            Err(e) => panic!("build failed: {e}"),
        };
        let ctx = MappingContext::new(&NoNesting);
        let before = CREATED.load(Ordering::SeqCst);
        for _ in 0..3 {
            assert_eq!(conv.invoke(&ctx, &Value::from("héllo")).ok(), Some(Value::U32(5)));
        }
        assert_eq!(CREATED.load(Ordering::SeqCst) - before, 3);
    }

    #[test]
    fn test_layered_scope_wins() {
        let parent = OverrideRegistry::new();
        parent.register(|s: String| format!("parent:{s}"));
        let scope = OverrideRegistry::new();
        scope.register(|s: String| format!("scope:{s}"));
        scope.register(|v: i32| v + 1);

        let parent: Arc<dyn OverrideProvider> = Arc::new(parent);
        let layered = LayeredOverrides::new(Arc::new(scope), Arc::clone(&parent));

        let text = String::descriptor();
        let ctx = MappingContext::new(&NoNesting);
        let out = layered
            .resolve(&text, &text)
            .map(|e| e.invoke(&ctx, &Value::from("x")));
        assert_eq!(out.and_then(|r| r.ok()), Some(Value::from("scope:x")));

        let int = i32::descriptor();
        assert!(layered.resolve(&int, &int).is_some());
        assert!(parent.resolve(&int, &int).is_none());
    }

    #[test]
    fn test_strategy_rechecks_provider() {
        let registry = Arc::new(OverrideRegistry::new());
        let strategy = ExplicitOverrideStrategy::new(registry.clone());
        let int = i32::descriptor();

        assert!(!strategy.can_handle(&int, &int));
        registry.register(|v: i32| v * 10);
        assert!(strategy.can_handle(&int, &int));
    }
}
