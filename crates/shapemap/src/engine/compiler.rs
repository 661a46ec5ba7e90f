// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Turns a strategy decision into a cached, ready-to-invoke mapper.

use crate::engine::cache::CompiledCache;
use crate::engine::compiled::CompiledConverter;
use crate::engine::key::TypePairKey;
use crate::engine::mapper::{CompiledMapper, Mapper, TypedMapper};
use crate::error::{MappingError, Result};
use crate::strategy::Strategy;
use crate::types::{Shape, TypeHandle};
use std::fmt;
use std::sync::Arc;

/// Resolves type pairs to mappers through the strategy chain.
pub struct MapperFactory {
    strategies: Vec<Arc<dyn Strategy>>,
    cache: Arc<CompiledCache>,
}

impl MapperFactory {
    /// Factory with its own compiled cache.
    pub fn new(strategies: Vec<Arc<dyn Strategy>>) -> Self {
        Self::with_cache(strategies, Arc::new(CompiledCache::new()))
    }

    /// Factory sharing an existing compiled cache.
    pub fn with_cache(strategies: Vec<Arc<dyn Strategy>>, cache: Arc<CompiledCache>) -> Self {
        Self { strategies, cache }
    }

    pub fn strategies(&self) -> &[Arc<dyn Strategy>] {
        &self.strategies
    }

    pub fn cache(&self) -> &Arc<CompiledCache> {
        &self.cache
    }

    /// Resolve a mapper for `source -> target`.
    ///
    /// A cached converter is wrapped without consulting any strategy.
    /// Otherwise the first strategy that claims the pair builds the
    /// converter, which is validated, cached, and wrapped.
    ///
    /// # Errors
    ///
    /// - [`MappingError::NotFound`] when no strategy claims the pair.
    /// - [`MappingError::Compilation`] when the claiming strategy fails or
    ///   produces a converter for the wrong target type.
    pub fn create_mapper(&self, source: &TypeHandle, target: &TypeHandle) -> Result<Arc<dyn Mapper>> {
        let key = TypePairKey::new(source, target);

        if let Some(hit) = self.cache.get(&key) {
            log::debug!("[compiler] cache hit {} -> {}", source.name, target.name);
            return Ok(Arc::new(CompiledMapper::new(hit)));
        }

        for strategy in &self.strategies {
            log::debug!(
                "[compiler] evaluating {} for {} -> {}",
                strategy.name(),
                source.name,
                target.name
            );
            if !strategy.can_handle(source, target) {
                continue;
            }
            log::info!(
                "[compiler] using {} for {} -> {}",
                strategy.name(),
                source.name,
                target.name
            );

            let converter = strategy
                .build(source, target)
                .and_then(|c| validate(source, target, c))
                .map_err(|e| wrap_failure(strategy.as_ref(), source, target, e))?;
            let stored = self.cache.insert(key, Arc::new(converter));
            return Ok(Arc::new(CompiledMapper::new(stored)));
        }

        log::warn!("[compiler] no strategy matched {} -> {}", source.name, target.name);
        Err(MappingError::not_found(source, target, self.strategies.len()))
    }

    /// Typed variant of [`MapperFactory::create_mapper`].
    pub fn create_typed<S: Shape, T: Shape>(&self) -> Result<TypedMapper<S, T>> {
        self.create_mapper(&S::descriptor(), &T::descriptor())
            .map(TypedMapper::new)
    }
}

impl fmt::Debug for MapperFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("MapperFactory")
            .field("strategies", &names)
            .field("cached", &self.cache.len())
            .finish()
    }
}

fn validate(
    source: &TypeHandle,
    target: &TypeHandle,
    converter: CompiledConverter,
) -> Result<CompiledConverter> {
    if converter.target() != target {
        return Err(MappingError::compilation(
            source,
            target,
            format!(
                "strategy produced a converter returning {} instead of {}",
                converter.target().name,
                target.name
            ),
            None,
        ));
    }
    Ok(converter)
}

fn wrap_failure(
    strategy: &dyn Strategy,
    source: &TypeHandle,
    target: &TypeHandle,
    err: MappingError,
) -> MappingError {
    log::error!(
        "[compiler] {} failed to build {} -> {}: {}",
        strategy.name(),
        source.name,
        target.name,
        err
    );
    if err.is_compilation() || err.is_not_found() {
        return err;
    }
    MappingError::compilation(
        source,
        target,
        format!("strategy {} failed to build converter", strategy.name()),
        Some(err),
    )
}
