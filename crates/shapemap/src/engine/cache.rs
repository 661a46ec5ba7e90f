// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Concurrent cache of compiled converters.
//!
//! One compiled converter per type pair, kept for the life of the process.
//! Concurrent first-time compilations for the same pair may all finish; the
//! first one stored wins and every caller gets the winner back.

use crate::engine::compiled::CompiledConverter;
use crate::engine::key::TypePairKey;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Cache hit/miss statistics.
#[derive(Debug, Default, Clone, Copy)]
pub struct LookupStats {
    pub hits: u64,
    pub misses: u64,
}

/// Insert-if-absent map from type pair to compiled converter.
#[derive(Debug, Default)]
pub struct CompiledCache {
    inner: DashMap<TypePairKey, Arc<CompiledConverter>>,
    stats: RwLock<LookupStats>,
}

impl CompiledCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a converter, counting the hit or miss.
    #[must_use]
    pub fn get(&self, key: &TypePairKey) -> Option<Arc<CompiledConverter>> {
        let found = self.inner.get(key).map(|e| Arc::clone(e.value()));
        let mut stats = self.stats.write();
        if found.is_some() {
            stats.hits = stats.hits.saturating_add(1);
        } else {
            stats.misses = stats.misses.saturating_add(1);
        }
        found
    }

    /// Store a converter unless one is already present; returns the stored one.
    pub fn insert(&self, key: TypePairKey, converter: Arc<CompiledConverter>) -> Arc<CompiledConverter> {
        let entry = self.inner.entry(key).or_insert(converter);
        Arc::clone(entry.value())
    }

    #[must_use]
    pub fn contains(&self, key: &TypePairKey) -> bool {
        self.inner.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> LookupStats {
        *self.stats.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Shape, Value};

    fn converter(offset: i32) -> Arc<CompiledConverter> {
        let int = i32::descriptor();
        Arc::new(CompiledConverter::new(int.clone(), int, move |_, v| {
            Ok(Value::I32(v.as_i32().unwrap_or_default() + offset))
        }))
    }

    #[test]
    fn test_first_insert_wins() {
        let cache = CompiledCache::new();
        let int = i32::descriptor();
        let key = TypePairKey::new(&int, &int);

        let first = converter(1);
        let stored = cache.insert(key.clone(), Arc::clone(&first));
        assert!(Arc::ptr_eq(&stored, &first));

        let second = cache.insert(key.clone(), converter(2));
        assert!(Arc::ptr_eq(&second, &first));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_stats() {
        let cache = CompiledCache::new();
        let int = i32::descriptor();
        let key = TypePairKey::new(&int, &int);

        assert!(cache.get(&key).is_none());
        cache.insert(key.clone(), converter(0));
        assert!(cache.get(&key).is_some());
        assert!(cache.get(&key).is_some());

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 2);
    }
}
