// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Engine configuration (YAML).
//!
//! ```yaml
//! strategies: [identity, explicit-override, sequence, property]
//! strict_fields: false
//! diagnostics: true
//! ```
//!
//! Every key is optional; missing keys take the [`EngineConfig::default`]
//! values.

use crate::error::{MappingError, Result};
use crate::strategy::{PlanOptions, StrategyKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Strategy chain, in evaluation order.
    pub strategies: Vec<StrategyKind>,
    /// Fail plan building on matched fields with incompatible types.
    pub strict_fields: bool,
    /// Attach an in-memory diagnostics sink.
    pub diagnostics: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategies: StrategyKind::DEFAULT_ORDER.to_vec(),
            strict_fields: false,
            diagnostics: true,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| MappingError::Config(format!("YAML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            MappingError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Reject empty or repeated strategy lists.
    pub fn validate(&self) -> Result<()> {
        if self.strategies.is_empty() {
            return Err(MappingError::Config(
                "at least one strategy is required".into(),
            ));
        }
        let mut seen = HashSet::new();
        for kind in &self.strategies {
            if !seen.insert(kind) {
                return Err(MappingError::Config(format!(
                    "strategy `{kind}` listed more than once"
                )));
            }
        }
        Ok(())
    }

    /// Property plan options derived from this config.
    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            strict_fields: self.strict_fields,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // test scaffolding
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.strategies, StrategyKind::DEFAULT_ORDER.to_vec());
        assert!(!config.strict_fields);
        assert!(config.diagnostics);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial() {
        let config = EngineConfig::from_yaml_str("strict_fields: true\n");
        assert!(matches!(config, Ok(ref c) if c.strict_fields && c.strategies.len() == 4));
    }

    #[test]
    fn test_parse_reordered() {
        let yaml = "strategies: [explicit-override, property]\ndiagnostics: false\n";
        let config = EngineConfig::from_yaml_str(yaml);
        let Ok(config) = config else {
            panic!("config should parse");
        };
        assert_eq!(
            config.strategies,
            vec![StrategyKind::ExplicitOverride, StrategyKind::Property]
        );
        assert!(!config.diagnostics);
    }

    #[test]
    fn test_rejects_bad_input() {
        for yaml in [
            "strategies: []\n",
            "strategies: [identity, identity]\n",
            "strategies: [reflection]\n",
            "unknown_key: 1\n",
        ] {
            let err = EngineConfig::from_yaml_str(yaml);
            assert!(matches!(err, Err(MappingError::Config(_))), "{yaml}");
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "strategies: [sequence, property]").unwrap();
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.strategies.len(), 2);

        let missing = EngineConfig::load("/nonexistent/shapemap.yaml");
        assert!(matches!(missing, Err(MappingError::Config(_))));
    }
}
