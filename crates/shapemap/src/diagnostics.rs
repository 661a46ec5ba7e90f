// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Registration diagnostics.
//!
//! A pure observer: the handler reports every pair it resolves for the first
//! time, and nothing in the engine ever reads the records back.

use crate::engine::TypePairKey;
use crate::types::TypeDescriptor;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;

/// First resolution of one type pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRecord {
    pub source_name: String,
    pub target_name: String,
    pub registered_at: DateTime<Utc>,
}

/// Sink for registration events.
pub trait MappingDiagnostics: Send + Sync {
    /// Record a pair. Only the first record per pair is kept.
    fn record_registration(&self, source: &TypeDescriptor, target: &TypeDescriptor);

    /// All records, oldest first.
    fn list_registrations(&self) -> Vec<RegistrationRecord>;

    fn lookup(&self, source: &TypeDescriptor, target: &TypeDescriptor)
        -> Option<RegistrationRecord>;

    fn count(&self) -> usize;
}

/// In-memory diagnostics sink.
#[derive(Debug, Default)]
pub struct InMemoryDiagnostics {
    records: DashMap<TypePairKey, RegistrationRecord>,
    order: RwLock<Vec<TypePairKey>>,
}

impl InMemoryDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MappingDiagnostics for InMemoryDiagnostics {
    fn record_registration(&self, source: &TypeDescriptor, target: &TypeDescriptor) {
        let key = TypePairKey::new(source, target);
        let mut inserted = false;
        self.records.entry(key.clone()).or_insert_with(|| {
            inserted = true;
            RegistrationRecord {
                source_name: source.name.clone(),
                target_name: target.name.clone(),
                registered_at: Utc::now(),
            }
        });
        if inserted {
            self.order.write().push(key);
        }
    }

    fn list_registrations(&self) -> Vec<RegistrationRecord> {
        let order = self.order.read().clone();
        let mut records: Vec<_> = order
            .iter()
            .filter_map(|key| self.records.get(key).map(|r| r.value().clone()))
            .collect();
        records.sort_by(|a, b| {
            a.registered_at
                .cmp(&b.registered_at)
                .then_with(|| a.source_name.cmp(&b.source_name))
                .then_with(|| a.target_name.cmp(&b.target_name))
        });
        records
    }

    fn lookup(
        &self,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> Option<RegistrationRecord> {
        self.records
            .get(&TypePairKey::new(source, target))
            .map(|r| r.value().clone())
    }

    fn count(&self) -> usize {
        self.records.len()
    }
}
