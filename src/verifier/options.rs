use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::dns::{self, ResolverSettings};
use crate::registry::DEFAULT_REGISTRY_URL;

/// Configuration knobs for [`EmailVerifier`](crate::EmailVerifier).
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// dns_timeout_ms = 2000
/// nameservers = ["1.1.1.1"]
/// registry_enabled = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifierOptions {
    pub registry_enabled: bool,
    pub registry_url: String,
    /// Local JSON list used instead of `registry_url` when set.
    pub registry_file: Option<PathBuf>,
    pub registry_timeout_ms: u64,
    /// Fail verifier construction when the list cannot be loaded instead of
    /// continuing with an empty registry.
    pub registry_required: bool,
    /// Per-query DNS timeout. A whole check may take `dns_attempts` times
    /// this. `0` disables the bound.
    pub dns_timeout_ms: u64,
    pub dns_attempts: usize,
    pub nameservers: Vec<IpAddr>,
    /// Number of addresses verified at once by `verify_many`.
    pub concurrency: usize,
}

impl Default for VerifierOptions {
    fn default() -> Self {
        Self {
            registry_enabled: true,
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            registry_file: None,
            registry_timeout_ms: 10_000,
            registry_required: false,
            dns_timeout_ms: 5_000,
            dns_attempts: dns::DEFAULT_DNS_ATTEMPTS,
            nameservers: Vec::new(),
            concurrency: 8,
        }
    }
}

impl VerifierOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|source| ConfigError::Parse {
            origin: "<inline>".to_string(),
            source,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            origin: path.display().to_string(),
            source,
        })
    }

    pub fn with_dns_timeout(mut self, timeout: Duration) -> Self {
        self.dns_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_nameservers<I>(mut self, nameservers: I) -> Self
    where
        I: IntoIterator<Item = IpAddr>,
    {
        self.nameservers = nameservers.into_iter().collect();
        self
    }

    pub fn with_registry_url(mut self, url: impl Into<String>) -> Self {
        self.registry_url = url.into();
        self.registry_file = None;
        self
    }

    pub fn with_registry_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.registry_file = Some(path.into());
        self
    }

    pub fn without_registry(mut self) -> Self {
        self.registry_enabled = false;
        self
    }

    pub fn require_registry(mut self, value: bool) -> Self {
        self.registry_required = value;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Returns the DNS bound as a [`Duration`]; `None` when disabled.
    pub fn dns_timeout(&self) -> Option<Duration> {
        if self.dns_timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.dns_timeout_ms))
        }
    }

    /// Bound applied around each whole domain or MX check, leaving room for
    /// every resolver attempt.
    pub fn dns_check_timeout(&self) -> Option<Duration> {
        dns::check_budget(self.dns_timeout(), self.dns_attempts)
    }

    pub fn registry_timeout(&self) -> Option<Duration> {
        if self.registry_timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.registry_timeout_ms))
        }
    }

    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            timeout: self.dns_timeout(),
            attempts: self.dns_attempts,
            nameservers: self.nameservers.clone(),
        }
    }

    /// Never below one.
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}
