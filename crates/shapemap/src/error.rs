// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Mapping error taxonomy.
//!
//! The engine never retries and never swallows these: a failed resolution is
//! reported on every call until its cause is fixed.

use crate::types::{TypeDescriptor, ValueError};
use thiserror::Error;

/// Result type alias for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;

/// Mapping errors.
#[derive(Debug, Error)]
pub enum MappingError {
    /// No strategy claims the type pair.
    #[error(
        "No mapping found for {source_type} -> {target_type}. \
         Evaluated {strategies_evaluated} strateg{plural}. Suggestions:\n  \
         1. Ensure {target_type} has a parameterless constructor\n  \
         2. Register an explicit mapper for {source_type} -> {target_type}\n  \
         3. Check field names match (case-insensitive)\n  \
         4. Verify field types are compatible",
        plural = if *strategies_evaluated == 1 { "y" } else { "ies" }
    )]
    NotFound {
        source_type: String,
        target_type: String,
        strategies_evaluated: usize,
    },

    /// A strategy matched but failed to build its converter.
    #[error("Failed to compile mapper for {source_type} -> {target_type}: {message}")]
    Compilation {
        source_type: String,
        target_type: String,
        message: String,
        #[source]
        cause: Option<Box<MappingError>>,
    },

    /// Declared-vs-actual type mismatch or an unusable runtime type name.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A converter ran but could not produce a valid result.
    #[error("Conversion {source_type} -> {target_type} failed: {message}")]
    Conversion {
        source_type: String,
        target_type: String,
        message: String,
    },

    /// A dynamic value could not be decoded into the requested Rust type.
    #[error("Value error: {0}")]
    Value(#[from] ValueError),

    /// Engine configuration could not be loaded or is inconsistent.
    #[error("Config error: {0}")]
    Config(String),
}

impl MappingError {
    pub fn not_found(
        source: &TypeDescriptor,
        target: &TypeDescriptor,
        strategies_evaluated: usize,
    ) -> Self {
        Self::NotFound {
            source_type: source.name.clone(),
            target_type: target.name.clone(),
            strategies_evaluated,
        }
    }

    pub fn compilation(
        source: &TypeDescriptor,
        target: &TypeDescriptor,
        message: impl Into<String>,
        cause: Option<MappingError>,
    ) -> Self {
        Self::Compilation {
            source_type: source.name.clone(),
            target_type: target.name.clone(),
            message: message.into(),
            cause: cause.map(Box::new),
        }
    }

    pub fn conversion(
        source: &TypeDescriptor,
        target: &TypeDescriptor,
        message: impl Into<String>,
    ) -> Self {
        Self::Conversion {
            source_type: source.name.clone(),
            target_type: target.name.clone(),
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_compilation(&self) -> bool {
        matches!(self, Self::Compilation { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
