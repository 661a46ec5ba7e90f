// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Public mapping entry point.
//!
//! Four call shapes share one algorithm:
//!
//! | Call | Source type | Target type |
//! |------|-------------|-------------|
//! | [`MapHandler::map`] | `S: Shape` | `T: Shape` |
//! | [`MapHandler::map_value`] | `S: Shape`, value erased | `T: Shape` |
//! | [`MapHandler::map_dynamic`] | handle | handle |
//! | [`MapHandler::map_by_name`] | name | name |
//!
//! A null input short-circuits to the target's zero value. Otherwise the
//! value must be an instance of the declared source type, checked before any
//! cache or strategy work. The mapper comes from the registry, or is created
//! by the factory and registered on a miss, and is then invoked with a child
//! context whose active dispatcher is this handler.

use crate::config::EngineConfig;
use crate::diagnostics::{InMemoryDiagnostics, MappingDiagnostics};
use crate::engine::cache::CompiledCache;
use crate::engine::compiler::MapperFactory;
use crate::engine::context::{Dispatcher, MappingContext};
use crate::engine::mapper::Mapper;
use crate::engine::registry::MapperRegistry;
use crate::error::{MappingError, Result};
use crate::strategy::{build_chain, OverrideProvider, OverrideRegistry, Strategy};
use crate::types::{Shape, TypeCatalog, TypeHandle, Value, ValueError};
use std::fmt;
use std::sync::Arc;

/// The mapping dispatch facade.
///
/// Cheap to clone; clones share registry, caches, diagnostics, and catalog.
#[derive(Clone)]
pub struct MapHandler {
    registry: Arc<MapperRegistry>,
    factory: Arc<MapperFactory>,
    diagnostics: Option<Arc<dyn MappingDiagnostics>>,
    catalog: Arc<TypeCatalog>,
}

impl MapHandler {
    /// Handler with the default configuration and no overrides.
    #[must_use]
    pub fn new() -> Self {
        let config = EngineConfig::default();
        let overrides: Arc<dyn OverrideProvider> = Arc::new(OverrideRegistry::new());
        let strategies = build_chain(&config.strategies, &overrides, config.plan_options());
        Self::from_parts(
            Arc::new(MapperRegistry::new()),
            Arc::new(MapperFactory::new(strategies)),
            Some(Arc::new(InMemoryDiagnostics::new())),
            Arc::new(TypeCatalog::new()),
        )
    }

    #[must_use]
    pub fn builder() -> MapHandlerBuilder {
        MapHandlerBuilder::default()
    }

    /// Assemble a handler from existing parts.
    pub fn from_parts(
        registry: Arc<MapperRegistry>,
        factory: Arc<MapperFactory>,
        diagnostics: Option<Arc<dyn MappingDiagnostics>>,
        catalog: Arc<TypeCatalog>,
    ) -> Self {
        Self {
            registry,
            factory,
            diagnostics,
            catalog,
        }
    }

    /// Map a typed value.
    ///
    /// Both types are added to this handler's catalog, so they can be used by
    /// name afterwards.
    pub fn map<S: Shape, T: Shape>(&self, source: &S) -> Result<T> {
        self.map_value::<S, T>(&source.to_value())
    }

    /// Map a dynamic value declared to be an `S`.
    ///
    /// A null input decodes to `None` for an `Option` target and to a zeroed
    /// instance for a constructible struct target.
    pub fn map_value<S: Shape, T: Shape>(&self, value: &Value) -> Result<T> {
        let (source, target) = (S::descriptor(), T::descriptor());
        self.catalog.register(&source);
        self.catalog.register(&target);
        let out = self.convert(None, value, &source, &target)?;
        match T::from_value(out) {
            Err(ValueError::UnexpectedNull { .. }) if value.is_null() => {
                let zeroed = target.instantiate().ok_or_else(|| ValueError::UnexpectedNull {
                    type_name: target.name.clone(),
                })?;
                Ok(T::from_value(Value::Struct(zeroed))?)
            }
            decoded => Ok(decoded?),
        }
    }

    /// Map a dynamic value between runtime types.
    pub fn map_dynamic(&self, value: &Value, source: &TypeHandle, target: &TypeHandle) -> Result<Value> {
        self.convert(None, value, source, target)
    }

    /// Map a dynamic value between types named at runtime.
    ///
    /// Names are resolved before the null short-circuit, so a bad name is
    /// reported even for a null input.
    pub fn map_by_name(&self, value: &Value, source_name: &str, target_name: &str) -> Result<Value> {
        let source = self.resolve_type(source_name)?;
        let target = self.resolve_type(target_name)?;
        self.convert(None, value, &source, &target)
    }

    /// Resolve a type name against this handler's catalog and the global one.
    pub fn resolve_type(&self, name: &str) -> Result<TypeHandle> {
        TypeCatalog::resolve_in(&[self.catalog.as_ref(), TypeCatalog::global()], name)
    }

    /// Resolve (and register) the mapper for a pair without invoking it.
    pub fn mapper_for(&self, source: &TypeHandle, target: &TypeHandle) -> Result<Arc<dyn Mapper>> {
        self.resolve(source, target)
    }

    pub fn registry(&self) -> &Arc<MapperRegistry> {
        &self.registry
    }

    pub fn factory(&self) -> &Arc<MapperFactory> {
        &self.factory
    }

    pub fn diagnostics(&self) -> Option<&Arc<dyn MappingDiagnostics>> {
        self.diagnostics.as_ref()
    }

    pub fn catalog(&self) -> &Arc<TypeCatalog> {
        &self.catalog
    }

    fn convert(
        &self,
        parent: Option<&MappingContext<'_>>,
        value: &Value,
        source: &TypeHandle,
        target: &TypeHandle,
    ) -> Result<Value> {
        if value.is_null() {
            return Ok(target.zero_value());
        }
        if !source.instance_of(value) {
            return Err(MappingError::invalid_argument(format!(
                "Source value of type {} is not an instance of declared source type {}",
                value.type_name(),
                source.name
            )));
        }

        let ctx = match parent {
            Some(parent) => parent.enter(self)?,
            None => MappingContext::new(self),
        };
        log::debug!(
            "[handler] mapping {} -> {} (depth {})",
            source.name,
            target.name,
            ctx.depth()
        );
        let mapper = self.resolve(source, target)?;
        mapper.map(&ctx, value)
    }

    fn resolve(&self, source: &TypeHandle, target: &TypeHandle) -> Result<Arc<dyn Mapper>> {
        if let Some(mapper) = self.registry.try_get(source, target) {
            return Ok(mapper);
        }

        log::info!("[handler] cache miss: creating mapper {} -> {}", source.name, target.name);
        let created = self.factory.create_mapper(source, target)?;
        let mapper = self.registry.register(source, target, created);
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.record_registration(source, target);
        }
        log::info!("[handler] registered mapper {} -> {}", source.name, target.name);
        Ok(mapper)
    }
}

impl Default for MapHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher for MapHandler {
    fn dispatch(
        &self,
        parent: &MappingContext<'_>,
        value: &Value,
        source: &TypeHandle,
        target: &TypeHandle,
    ) -> Result<Value> {
        self.convert(Some(parent), value, source, target)
    }
}

impl fmt::Debug for MapHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapHandler")
            .field("registry", &self.registry)
            .field("factory", &self.factory)
            .field("diagnostics", &self.diagnostics.is_some())
            .field("catalog", &self.catalog.len())
            .finish()
    }
}

/// Assembles a [`MapHandler`] from configuration and shared parts.
#[derive(Default)]
pub struct MapHandlerBuilder {
    config: EngineConfig,
    overrides: Option<Arc<dyn OverrideProvider>>,
    strategies: Option<Vec<Arc<dyn Strategy>>>,
    diagnostics: Option<Arc<dyn MappingDiagnostics>>,
    registry: Option<Arc<MapperRegistry>>,
    cache: Option<Arc<CompiledCache>>,
    catalog: Option<Arc<TypeCatalog>>,
}

impl MapHandlerBuilder {
    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Provider consulted by the explicit-override strategy.
    #[must_use]
    pub fn overrides(mut self, overrides: Arc<dyn OverrideProvider>) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Use a custom strategy chain instead of the configured one.
    #[must_use]
    pub fn strategies(mut self, strategies: Vec<Arc<dyn Strategy>>) -> Self {
        self.strategies = Some(strategies);
        self
    }

    /// Diagnostics sink; takes precedence over the `diagnostics` config flag.
    #[must_use]
    pub fn diagnostics(mut self, diagnostics: Arc<dyn MappingDiagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    #[must_use]
    pub fn registry(mut self, registry: Arc<MapperRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn compiled_cache(mut self, cache: Arc<CompiledCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub fn catalog(mut self, catalog: Arc<TypeCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Validate the configuration and build the handler.
    pub fn build(self) -> Result<MapHandler> {
        self.config.validate()?;

        let strategies = match self.strategies {
            Some(custom) if custom.is_empty() => {
                return Err(MappingError::Config("strategy chain is empty".into()));
            }
            Some(custom) => custom,
            None => {
                let overrides = self
                    .overrides
                    .unwrap_or_else(|| Arc::new(OverrideRegistry::new()) as Arc<dyn OverrideProvider>);
                build_chain(
                    &self.config.strategies,
                    &overrides,
                    self.config.plan_options(),
                )
            }
        };
        let cache = self.cache.unwrap_or_default();
        let diagnostics = match self.diagnostics {
            Some(sink) => Some(sink),
            None if self.config.diagnostics => {
                Some(Arc::new(InMemoryDiagnostics::new()) as Arc<dyn MappingDiagnostics>)
            }
            None => None,
        };

        let names: Vec<_> = strategies.iter().map(|s| s.name()).collect();
        log::debug!("[handler] strategy chain: {}", names.join(", "));

        Ok(MapHandler::from_parts(
            self.registry.unwrap_or_default(),
            Arc::new(MapperFactory::with_cache(strategies, cache)),
            diagnostics,
            self.catalog.unwrap_or_default(),
        ))
    }
}

impl fmt::Debug for MapHandlerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapHandlerBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PrimitiveKind, StructValue, TypeDescriptorBuilder};

    #[test]
    fn test_null_short_circuits() {
        let handler = MapHandler::new();
        let int = i32::descriptor();
        let text = String::descriptor();

        let out = handler.map_dynamic(&Value::Null, &int, &text);
        assert_eq!(out.ok(), Some(Value::String(String::new())));
        assert!(handler.registry().is_empty());
        assert_eq!(handler.diagnostics().map(|d| d.count()), Some(0));
    }

    #[test]
    fn test_type_mismatch_before_resolution() {
        let handler = MapHandler::new();
        let guest = TypeDescriptorBuilder::new("Guest")
            .string_field("name")
            .build_handle();
        let room = TypeDescriptorBuilder::new("Room")
            .field("number", PrimitiveKind::U32)
            .build_handle();

        let value = Value::Struct(StructValue::zeroed(&room));
        let err = handler.map_dynamic(&value, &guest, &guest);
        let msg = err.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(msg.contains("Room"));
        assert!(msg.contains("Guest"));
        assert!(handler.registry().is_empty());
        assert!(handler.factory().cache().is_empty());
    }

    #[test]
    fn test_builder_rejects_empty_chain() {
        let err = MapHandler::builder().strategies(Vec::new()).build();
        assert!(matches!(err, Err(MappingError::Config(_))));

        let config = EngineConfig {
            strategies: Vec::new(),
            ..EngineConfig::default()
        };
        assert!(MapHandler::builder().config(config).build().is_err());
    }

    #[test]
    fn test_builder_diagnostics_flag() {
        let config = EngineConfig {
            diagnostics: false,
            ..EngineConfig::default()
        };
        let handler = MapHandler::builder().config(config).build();
        assert!(matches!(handler, Ok(ref h) if h.diagnostics().is_none()));
    }
}
