//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services. Request
//! handling never reads process-wide environment variables; the binaries read them and hand the
//! raw values to the parsing helpers below.

use crate::{HerbalError, HerbalResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    catalog_path: Option<PathBuf>,
    store_path: Option<PathBuf>,
    rng_seed: Option<u64>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `catalog_path`, when set, must point at an existing file; the built-in catalog is used
    /// otherwise.
    pub fn new(
        catalog_path: Option<PathBuf>,
        store_path: Option<PathBuf>,
        rng_seed: Option<u64>,
    ) -> HerbalResult<Self> {
        if let Some(path) = &catalog_path {
            if !path.is_file() {
                return Err(HerbalError::InvalidInput(format!(
                    "catalog override is not a file: {}",
                    path.display()
                )));
            }
        }

        Ok(Self {
            catalog_path,
            store_path,
            rng_seed,
        })
    }

    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }

    pub fn store_path(&self) -> Option<&Path> {
        self.store_path.as_deref()
    }

    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }
}

/// Parse an optional path from an environment value.
///
/// `None`, empty and whitespace-only values all mean "not configured".
pub fn path_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Parse the mixer RNG seed from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `Ok(None)` and the mixer seeds from entropy.
pub fn rng_seed_from_env_value(value: Option<String>) -> HerbalResult<Option<u64>> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    value
        .map(|v| {
            v.parse::<u64>().map_err(|_| {
                HerbalError::InvalidInput(format!("HERBAL_RNG_SEED must be an unsigned integer, got {v:?}"))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_seed_means_entropy() {
        assert_eq!(rng_seed_from_env_value(None).unwrap(), None);
        assert_eq!(rng_seed_from_env_value(Some("  ".into())).unwrap(), None);
    }

    #[test]
    fn numeric_seed_is_parsed() {
        assert_eq!(rng_seed_from_env_value(Some(" 42 ".into())).unwrap(), Some(42));
    }

    #[test]
    fn non_numeric_seed_is_rejected() {
        let err = rng_seed_from_env_value(Some("abc".into())).expect_err("should reject");
        assert!(matches!(err, HerbalError::InvalidInput(_)));
    }

    #[test]
    fn missing_catalog_override_is_rejected() {
        let err = CoreConfig::new(Some(PathBuf::from("/definitely/not/here.yaml")), None, None)
            .expect_err("should reject");
        assert!(err.to_string().contains("not a file"));
    }

    #[test]
    fn blank_path_is_not_configured() {
        assert_eq!(path_from_env_value(Some("".into())), None);
        assert_eq!(
            path_from_env_value(Some("/tmp/store.json".into())),
            Some(PathBuf::from("/tmp/store.json"))
        );
    }
}
