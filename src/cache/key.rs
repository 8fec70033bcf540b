//! Cache key derivation

use crate::platform::HostInfo;
use std::fmt;

/// Namespace prefix; bump the version to invalidate every existing entry
pub const KEY_NAMESPACE: &str = "install-sfml-v1";

/// Key addressing a cached build directory
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for a build of `reference` in `config` on `host`
    pub fn new(reference: &str, config: &str, host: &HostInfo) -> Self {
        Self(format!(
            "{}-{}-{}--{}-{}-{}",
            KEY_NAMESPACE, reference, config, host.arch, host.os, host.release
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
