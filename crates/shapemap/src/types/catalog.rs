// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Name-based type lookup.
//!
//! The catalog is the set of types a runtime type name may refer to. Types
//! land here explicitly (`register`) or implicitly when a typed mapping call
//! touches them.

use crate::error::{MappingError, Result};
use crate::types::{names_match, primitive_handle, PrimitiveKind, Shape, TypeHandle, TypeKind};
use dashmap::DashMap;
use std::sync::{Arc, OnceLock};

/// Concurrent catalog of known types, keyed by qualified name.
#[derive(Debug, Default)]
pub struct TypeCatalog {
    types: DashMap<Arc<str>, TypeHandle>,
}

impl TypeCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-loaded with every primitive type.
    #[must_use]
    pub fn with_primitives() -> Self {
        let catalog = Self::new();
        for kind in PrimitiveKind::ALL {
            catalog.register(&primitive_handle(kind));
        }
        catalog
    }

    /// Process-wide catalog.
    pub fn global() -> &'static TypeCatalog {
        static GLOBAL: OnceLock<TypeCatalog> = OnceLock::new();
        GLOBAL.get_or_init(Self::with_primitives)
    }

    /// Register a type and every type reachable from it.
    ///
    /// Insert-if-absent: the first descriptor registered under a qualified
    /// name is kept.
    pub fn register(&self, handle: &TypeHandle) {
        let mut pending = vec![Arc::clone(handle)];
        while let Some(next) = pending.pop() {
            if self.types.contains_key(&next.qualified_name) {
                continue;
            }
            match &next.kind {
                TypeKind::Struct(s) => {
                    pending.extend(s.fields.iter().map(|f| Arc::clone(&f.type_desc)));
                }
                TypeKind::Sequence(seq) => pending.push(Arc::clone(&seq.element_type)),
                TypeKind::Primitive(_) => {}
            }
            self.types
                .entry(Arc::clone(&next.qualified_name))
                .or_insert(next);
        }
    }

    /// Register a [`Shape`] type.
    pub fn register_shape<T: Shape>(&self) {
        self.register(&T::descriptor());
    }

    /// Check whether a qualified name is registered.
    #[must_use]
    pub fn contains(&self, qualified_name: &str) -> bool {
        self.types.contains_key(qualified_name)
    }

    /// Exact lookup by qualified name.
    #[must_use]
    pub fn get(&self, qualified_name: &str) -> Option<TypeHandle> {
        self.types.get(qualified_name).map(|e| Arc::clone(e.value()))
    }

    /// Resolve a type name.
    ///
    /// An exact qualified-name match wins. Otherwise the name must match
    /// exactly one type's short or qualified name, ignoring case.
    pub fn resolve(&self, name: &str) -> Result<TypeHandle> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MappingError::invalid_argument("Type name cannot be empty"));
        }
        if let Some(exact) = self.get(name) {
            return Ok(exact);
        }

        let mut candidates = self.candidates(name);
        match candidates.len() {
            0 => Err(MappingError::invalid_argument(format!(
                "Type '{name}' was not found"
            ))),
            1 => Ok(candidates.remove(0)),
            _ => Err(ambiguous(name, &candidates)),
        }
    }

    /// Resolve across several catalogs, nearest first.
    ///
    /// Exact matches are tried across every catalog before falling back to
    /// case-insensitive matching over the union of all of them.
    pub fn resolve_in(catalogs: &[&TypeCatalog], name: &str) -> Result<TypeHandle> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MappingError::invalid_argument("Type name cannot be empty"));
        }
        if let Some(exact) = catalogs.iter().find_map(|c| c.get(name)) {
            return Ok(exact);
        }

        let mut candidates: Vec<TypeHandle> = Vec::new();
        for catalog in catalogs {
            for found in catalog.candidates(name) {
                if !candidates.contains(&found) {
                    candidates.push(found);
                }
            }
        }
        match candidates.len() {
            0 => Err(MappingError::invalid_argument(format!(
                "Type '{name}' was not found"
            ))),
            1 => Ok(candidates.remove(0)),
            _ => Err(ambiguous(name, &candidates)),
        }
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn candidates(&self, name: &str) -> Vec<TypeHandle> {
        self.types
            .iter()
            .filter(|e| names_match(&e.value().name, name) || names_match(e.key(), name))
            .map(|e| Arc::clone(e.value()))
            .collect()
    }
}

fn ambiguous(name: &str, candidates: &[TypeHandle]) -> MappingError {
    let mut names: Vec<&str> = candidates.iter().map(|c| &*c.qualified_name).collect();
    names.sort_unstable();
    MappingError::invalid_argument(format!(
        "Type name '{name}' is ambiguous: {}",
        names.join(", ")
    ))
}
