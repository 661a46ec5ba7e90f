// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Type-pair identity used by every cache.

use crate::types::TypeDescriptor;
use std::fmt;
use std::sync::Arc;

/// Identifies one conversion problem: an ordered (source, target) pair.
///
/// Built from qualified names, so it stays valid for as long as the two
/// types exist and is cheap to clone.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypePairKey {
    source: Arc<str>,
    target: Arc<str>,
}

impl TypePairKey {
    #[must_use]
    pub fn new(source: &TypeDescriptor, target: &TypeDescriptor) -> Self {
        Self {
            source: Arc::clone(&source.qualified_name),
            target: Arc::clone(&target.qualified_name),
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl fmt::Display for TypePairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}
