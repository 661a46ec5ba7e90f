// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Registry of ready-to-invoke mappers.
//!
//! This is what the handler consults before compiling anything. Entries are
//! either compiled mappers or closures registered by hand; the first
//! registration for a pair wins and is never replaced.

use crate::engine::key::TypePairKey;
use crate::engine::mapper::{FnMapper, Mapper, TypedMapper};
use crate::types::{Shape, TypeDescriptor};
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;

/// Concurrent first-writer-wins mapper registry.
#[derive(Default)]
pub struct MapperRegistry {
    mappers: DashMap<TypePairKey, Arc<dyn Mapper>>,
}

impl MapperRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapper registered for the pair, if any.
    #[must_use]
    pub fn try_get(
        &self,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> Option<Arc<dyn Mapper>> {
        self.mappers
            .get(&TypePairKey::new(source, target))
            .map(|e| Arc::clone(e.value()))
    }

    /// Typed lookup.
    #[must_use]
    pub fn get_typed<S: Shape, T: Shape>(&self) -> Option<TypedMapper<S, T>> {
        self.try_get(&S::descriptor(), &T::descriptor())
            .map(TypedMapper::new)
    }

    /// Register a mapper unless the pair already has one.
    ///
    /// Returns the registered mapper: `mapper` itself if it won, the earlier
    /// entry otherwise.
    pub fn register(
        &self,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
        mapper: Arc<dyn Mapper>,
    ) -> Arc<dyn Mapper> {
        let key = TypePairKey::new(source, target);
        let entry = self.mappers.entry(key).or_insert_with(|| {
            log::debug!("[registry] registered {} -> {}", source.name, target.name);
            mapper
        });
        Arc::clone(entry.value())
    }

    /// Register a typed closure for `S -> T`.
    pub fn register_fn<S, T, F>(&self, func: F) -> Arc<dyn Mapper>
    where
        S: Shape,
        T: Shape,
        F: Fn(S) -> T + Send + Sync + 'static,
    {
        let mapper: Arc<dyn Mapper> = Arc::new(FnMapper::<S, T>::new(func));
        self.register(&S::descriptor(), &T::descriptor(), mapper)
    }

    #[must_use]
    pub fn is_registered(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        self.mappers
            .contains_key(&TypePairKey::new(source, target))
    }

    /// Registered pairs, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<TypePairKey> {
        let mut keys: Vec<_> = self.mappers.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }
}

impl fmt::Debug for MapperRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapperRegistry")
            .field("mappers", &self.mappers.len())
            .finish()
    }
}
