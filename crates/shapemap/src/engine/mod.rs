// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Mapping engine
//!
//! Resolution flows handler → registry → factory → compiled cache →
//! strategies. Converters that need nested conversions re-enter the handler
//! through the [`MappingContext`] they are invoked with.

mod cache;
mod compiled;
mod compiler;
mod context;
mod handler;
mod key;
mod mapper;
mod registry;

pub use cache::{CompiledCache, LookupStats};
pub use compiled::{CompiledConverter, ConvertFn};
pub use compiler::MapperFactory;
pub use context::{Dispatcher, MappingContext, MAX_DEPTH};
pub use handler::{MapHandler, MapHandlerBuilder};
pub use key::TypePairKey;
pub use mapper::{CompiledMapper, FnMapper, Mapper, TypedMapper};
pub use registry::MapperRegistry;
