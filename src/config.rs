//! Configuration: where the catalog lives and how far exhaustive
//! enumerations may go.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::Algebra;
use crate::error::{LAlgebraError, Result};
use crate::ideal::ideals_within;
use crate::morphism::endomorphisms_within;
use crate::subset::ElementSet;

/// Environment variable overriding [`Config::catalog_path`]
pub const CATALOG_ENV: &str = "LALGEBRAS_CATALOG";

/// Main configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog archive (`data/catalog.rkyv` by default)
    pub catalog_path: PathBuf,

    /// Size caps for the power-set and function-space enumerations
    pub limits: EnumerationLimits,
}

/// Carrier sizes above which the `*_within` enumerations refuse to run,
/// and above which the unbounded ones log a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumerationLimits {
    /// `ideals` walks `2^n` subsets
    pub max_subset_size: usize,
    /// `endomorphisms` walks `n^(n-1)` maps
    pub max_function_size: usize,
}

impl Default for EnumerationLimits {
    fn default() -> Self {
        Self {
            max_subset_size: 20,
            max_function_size: 8,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("data").join("catalog.rkyv"),
            limits: EnumerationLimits::default(),
        }
    }
}

impl Config {
    /// Defaults, with the catalog path taken from `LALGEBRAS_CATALOG` if set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(path) = std::env::var(CATALOG_ENV) {
            if !path.is_empty() {
                config.catalog_path = PathBuf::from(path);
            }
        }
        config
    }

    /// Read a JSON config file; missing fields fall back to defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            LAlgebraError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    LAlgebraError::Config(format!("failed to create {}: {}", parent.display(), e))
                })?;
            }
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(|e| {
            LAlgebraError::Config(format!("failed to write {}: {}", path.display(), e))
        })
    }

    /// All ideals of `a`, refused above `limits.max_subset_size`
    pub fn ideals(&self, a: &Algebra) -> Result<Vec<ElementSet>> {
        ideals_within(a, &self.limits)
    }

    /// All endomorphisms of `a`, refused above `limits.max_function_size`
    pub fn endomorphisms(&self, a: &Algebra) -> Result<Vec<Vec<usize>>> {
        endomorphisms_within(a, &self.limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"limits": {"max_subset_size": 6}}"#).unwrap();
        assert_eq!(config.limits.max_subset_size, 6);
        assert_eq!(config.limits.max_function_size, 8);
        assert_eq!(config.catalog_path, Config::default().catalog_path);
    }

    #[test]
    fn enumerations_follow_configured_limits() {
        let a = Algebra::chain(3).unwrap();
        let mut config = Config::default();
        assert_eq!(config.ideals(&a).unwrap().len(), 3);
        assert!(config.endomorphisms(&a).unwrap().contains(&vec![1, 2, 3]));

        config.limits.max_subset_size = 2;
        config.limits.max_function_size = 2;
        assert!(matches!(
            config.ideals(&a),
            Err(LAlgebraError::EnumerationTooLarge { what: "subset", size: 3, limit: 2 })
        ));
        assert!(matches!(
            config.endomorphisms(&a),
            Err(LAlgebraError::EnumerationTooLarge { what: "function", size: 3, limit: 2 })
        ));
    }
}
