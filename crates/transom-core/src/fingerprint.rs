//! Content fingerprinting for compiled modules.
//!
//! A fingerprint summarizes a compilation unit's effective inputs: the module
//! source bytes plus the injected parameters. Equality of two fingerprints is
//! the sole criterion for treating a module as unchanged.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::Path;

use crate::error::Result;
use crate::params::ParamMap;

/// Hash over a module's source bytes and its injected-parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Compute the fingerprint of a module source plus its parameters.
    ///
    /// Pure and deterministic. Parameters are hashed in `BTreeMap` key order,
    /// so the result does not depend on insertion order.
    pub fn compute(source: &[u8], params: &ParamMap) -> Self {
        let mut hasher = DefaultHasher::new();
        source.hash(&mut hasher);
        for (key, value) in params {
            key.hash(&mut hasher);
            value.hash(&mut hasher);
        }
        Self(hasher.finish())
    }

    /// Read a persisted fingerprint record.
    ///
    /// Returns `None` when the record is absent or unreadable; callers treat
    /// both as stale.
    pub fn load(path: &Path) -> Option<Self> {
        let text = fs::read_to_string(path).ok()?;
        text.trim().parse::<u64>().ok().map(Self)
    }

    /// Persist the fingerprint as a decimal text record.
    pub fn store(&self, path: &Path) -> Result<()> {
        fs::write(path, self.0.to_string())?;
        Ok(())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
