// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! # shapemap - convention-based type-to-type mapping
//!
//! Converts values of one schema into another without a hand-written
//! conversion for every pair. Conversions are resolved once per type pair
//! through an ordered strategy chain, compiled into a reusable converter,
//! and cached for the life of the process.
//!
//! ## Quick Start
//!
//! ```rust
//! use shapemap::{MapHandler, Result, Shape};
//!
//! #[derive(Debug, Default, Shape)]
//! struct PartnerBooking {
//!     code: String,
//!     name: String,
//!     guests: i32,
//! }
//!
//! #[derive(Debug, Default, PartialEq, Shape)]
//! struct Booking {
//!     id: String,
//!     name: String,
//!     guest_count: i32,
//! }
//!
//! fn main() -> Result<()> {
//!     let handler = MapHandler::new();
//!     let partner = PartnerBooking {
//!         code: "GOO-1".into(),
//!         name: "alice".into(),
//!         guests: 2,
//!     };
//!
//!     // Only `name` matches; the other target fields keep their defaults.
//!     let booking: Booking = handler.map(&partner)?;
//!     assert_eq!(booking.name, "alice");
//!     assert_eq!(booking.guest_count, 0);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |  MapHandler   map | map_value | map_dynamic | map_by_name          |
//! +---------------------------------------------------------------------+
//! |  MapperRegistry (pair -> mapper)        MappingDiagnostics          |
//! +---------------------------------------------------------------------+
//! |  MapperFactory -> CompiledCache (pair -> compiled converter)        |
//! +---------------------------------------------------------------------+
//! |  Strategies: identity | explicit-override | sequence | property     |
//! +---------------------------------------------------------------------+
//! |  Runtime types: TypeDescriptor | Value | Shape | TypeCatalog        |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`MapHandler`] | Entry point, four call shapes over one algorithm |
//! | [`OverrideRegistry`] | Hand-written conversions that beat conventions |
//! | [`EngineConfig`] | Strategy order, strict field mode, diagnostics |
//! | [`Shape`] | Bridge from Rust types to the runtime type model |
//! | [`MappingError`] | NotFound, Compilation, InvalidArgument, ... |

// Clippy: No blanket suppressions. Fix issues properly or use inline #[allow] with justification.

// Allow the derive macro to work inside this crate's tests
extern crate self as shapemap;

/// Engine configuration (strategy order, strict mode, diagnostics).
pub mod config;
/// First-resolution diagnostics sink.
pub mod diagnostics;
/// Handler, compiler, caches, registry, and call context.
pub mod engine;
/// Mapping error taxonomy.
pub mod error;
/// Conversion strategies and explicit overrides.
pub mod strategy;
/// Runtime type model (descriptors, values, `Shape`, catalog).
pub mod types;

pub use config::EngineConfig;
pub use diagnostics::{InMemoryDiagnostics, MappingDiagnostics, RegistrationRecord};
pub use engine::{
    CompiledConverter, Dispatcher, MapHandler, MapHandlerBuilder, Mapper, MapperFactory,
    MapperRegistry, MappingContext, TypePairKey, TypedMapper,
};
pub use error::{MappingError, Result};
pub use strategy::{
    LayeredOverrides, OverrideLifetime, OverrideProvider, OverrideRegistry, Strategy,
    StrategyKind, TypeMapper,
};
pub use types::{Shape, TypeCatalog, TypeDescriptor, TypeHandle, Value};

// Re-export derive macro (for #[derive(shapemap::Shape)])
#[cfg(feature = "derive")]
pub use shapemap_codegen::Shape;

/// shapemap version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
