//! Disposable-domain registry.
//!
//! The list is fetched once (see [`DisposableRegistry::load`]) and never
//! mutated afterwards, so a single instance can be shared by every
//! verification without locking.

mod error;
mod source;

pub use error::RegistryError;
pub use source::{DEFAULT_REGISTRY_URL, DomainListSource, FileListSource, HttpListSource};

use std::collections::HashSet;

use tracing::{info, warn};

use crate::syntax::extract_domain;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisposableRegistry {
    domains: HashSet<String>,
}

impl DisposableRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Domains are stored as given: no case folding, no trimming.
    pub fn from_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: domains.into_iter().map(Into::into).collect(),
        }
    }

    /// Fetches the list from `source`, surfacing any failure.
    pub async fn try_load<S>(source: &S) -> Result<Self, RegistryError>
    where
        S: DomainListSource + ?Sized,
    {
        let domains = source.fetch().await?;
        let registry = Self::from_domains(domains);
        info!(
            source = %source.describe(),
            domains = registry.len(),
            "disposable-domain registry loaded"
        );
        Ok(registry)
    }

    /// Fail-open variant of [`try_load`](Self::try_load): any failure yields
    /// an empty registry, so nothing gets flagged as disposable.
    pub async fn load<S>(source: &S) -> Self
    where
        S: DomainListSource + ?Sized,
    {
        match Self::try_load(source).await {
            Ok(registry) => registry,
            Err(err) => {
                warn!(
                    source = %source.describe(),
                    error = %err,
                    "disposable-domain registry unavailable, continuing with an empty list"
                );
                Self::empty()
            }
        }
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    /// Membership of the domain after the first `@`; `false` without one.
    pub fn contains_email(&self, email: &str) -> bool {
        extract_domain(email).is_some_and(|domain| self.contains(domain))
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}
