// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Travel-reservation samples for shapemap.
//!
//! [`models`] holds the hotel-side schema, [`google`] a partner schema plus
//! the hand-written conversions registered for it. [`handler`] wires both
//! into a [`MapHandler`], optionally from a YAML engine config.

pub mod google;
pub mod models;

use shapemap::{EngineConfig, MapHandler, OverrideProvider, OverrideRegistry};
use std::path::Path;
use std::sync::Arc;

/// Handler with the Google partner overrides registered.
pub fn handler(config: Option<&Path>) -> anyhow::Result<MapHandler> {
    let config = match config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let overrides = Arc::new(OverrideRegistry::new());
    google::register(&overrides);

    log::debug!("[samples] {} partner overrides registered", overrides.len());
    let handler = MapHandler::builder()
        .config(config)
        .overrides(overrides as Arc<dyn OverrideProvider>)
        .build()?;
    Ok(handler)
}
