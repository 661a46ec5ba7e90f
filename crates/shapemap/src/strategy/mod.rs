// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Conversion strategies
//!
//! A strategy decides whether it can convert a type pair and, if so, builds
//! the converter. Strategies are evaluated in a fixed order and the first one
//! that claims a pair is used; a build failure is final for that resolution.
//!
//! | Kind | Claims |
//! |------|--------|
//! | `identity` | `T -> T` for non-sequence types |
//! | `explicit-override` | pairs with a hand-written mapper |
//! | `sequence` | `Vec<A> -> Vec<B>` |
//! | `property` | any source to a constructible struct target |

mod identity;
mod overrides;
mod property;
mod sequence;

pub use identity::IdentityStrategy;
pub use overrides::{
    ExplicitOverrideStrategy, LayeredOverrides, OverrideEntry, OverrideLifetime,
    OverrideProvider, OverrideRegistry, TypeMapper,
};
pub use property::{PlanOptions, PropertyPlan, PropertyStrategy};
pub use sequence::SequenceStrategy;

use crate::engine::CompiledConverter;
use crate::error::Result;
use crate::types::TypeHandle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// One link of the strategy chain.
pub trait Strategy: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Whether this strategy claims the pair.
    fn can_handle(&self, source: &TypeHandle, target: &TypeHandle) -> bool;

    /// Build the converter for a claimed pair.
    fn build(&self, source: &TypeHandle, target: &TypeHandle) -> Result<CompiledConverter>;
}

/// Built-in strategies, as named in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    Identity,
    ExplicitOverride,
    Sequence,
    Property,
}

impl StrategyKind {
    /// Canonical evaluation order.
    pub const DEFAULT_ORDER: [StrategyKind; 4] = [
        Self::Identity,
        Self::ExplicitOverride,
        Self::Sequence,
        Self::Property,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::ExplicitOverride => "explicit-override",
            Self::Sequence => "sequence",
            Self::Property => "property",
        }
    }

    /// Instantiate the strategy.
    pub fn instantiate(
        &self,
        overrides: &Arc<dyn OverrideProvider>,
        options: PlanOptions,
    ) -> Arc<dyn Strategy> {
        match self {
            Self::Identity => Arc::new(IdentityStrategy::new(options)),
            Self::ExplicitOverride => {
                Arc::new(ExplicitOverrideStrategy::new(Arc::clone(overrides)))
            }
            Self::Sequence => Arc::new(SequenceStrategy),
            Self::Property => Arc::new(PropertyStrategy::new(options)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Instantiate a chain in the given order.
pub fn build_chain(
    kinds: &[StrategyKind],
    overrides: &Arc<dyn OverrideProvider>,
    options: PlanOptions,
) -> Vec<Arc<dyn Strategy>> {
    kinds
        .iter()
        .map(|kind| kind.instantiate(overrides, options))
        .collect()
}
