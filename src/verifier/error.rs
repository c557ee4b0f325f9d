use std::path::PathBuf;

use thiserror::Error;

use crate::registry::RegistryError;

/// Errors raised while building an [`EmailVerifier`](crate::EmailVerifier).
///
/// Verification itself never fails; see [`VerificationResult`](crate::VerificationResult).
#[derive(Debug, Error)]
pub enum VerifierError {
    #[error("disposable-domain registry is required but could not be loaded: {source}")]
    Registry {
        #[source]
        source: RegistryError,
    },
}

impl VerifierError {
    pub(crate) fn registry(source: RegistryError) -> Self {
        Self::Registry { source }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
}
