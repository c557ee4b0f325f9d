use std::io;
use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;
use trust_dns_resolver::TokioAsyncResolver;
use trust_dns_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use trust_dns_resolver::system_conf::read_system_conf;

use super::{DnsError, MxRecord};

/// Resolver tuning derived from [`VerifierOptions`](crate::VerifierOptions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Per-query timeout handed to the resolver. `None` keeps the system value.
    pub timeout: Option<Duration>,
    pub attempts: usize,
    /// Explicit upstream servers (port 53, UDP+TCP). Empty means system config.
    pub nameservers: Vec<IpAddr>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            timeout: Some(super::DEFAULT_DNS_TIMEOUT),
            attempts: super::DEFAULT_DNS_ATTEMPTS,
            nameservers: Vec::new(),
        }
    }
}

/// Builds a tokio resolver from `/etc/resolv.conf` (or the explicit
/// nameservers in `settings`) with bounded timeouts.
///
/// An unreadable system configuration falls back to the resolver's built-in
/// upstreams, so this never fails; a broken network shows up later as
/// inconclusive lookups.
pub fn build_resolver(settings: &ResolverSettings) -> TokioAsyncResolver {
    let (config, opts) = resolver_config(settings, read_system_conf);
    TokioAsyncResolver::tokio(config, opts)
}

/// `system` is only consulted when `settings` names no nameservers.
pub(crate) fn resolver_config<F>(
    settings: &ResolverSettings,
    system: F,
) -> (ResolverConfig, ResolverOpts)
where
    F: FnOnce() -> io::Result<(ResolverConfig, ResolverOpts)>,
{
    let (config, mut opts) = if settings.nameservers.is_empty() {
        system().unwrap_or_else(|err| {
            warn!(
                error = %err,
                "system resolver configuration unusable, using default upstreams"
            );
            (ResolverConfig::default(), ResolverOpts::default())
        })
    } else {
        let group = NameServerConfigGroup::from_ips_clear(&settings.nameservers, 53, true);
        (
            ResolverConfig::from_parts(None, Vec::new(), group),
            ResolverOpts::default(),
        )
    };

    if let Some(timeout) = settings.timeout {
        opts.timeout = timeout;
    }
    opts.attempts = settings.attempts.max(1);
    (config, opts)
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    let trimmed = exchange.trim_end_matches('.');
    trimmed.to_ascii_lowercase()
}

/// Lookups needed by the verifier. Implemented for the trust-dns resolver;
/// tests plug in stubs.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    /// Forward (A/AAAA) resolution of `domain`.
    async fn lookup_host(&self, domain: &str) -> Result<Vec<IpAddr>, DnsError>;

    /// MX records of `domain`, in any order.
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError>;
}

#[async_trait]
impl DnsLookup for TokioAsyncResolver {
    async fn lookup_host(&self, domain: &str) -> Result<Vec<IpAddr>, DnsError> {
        let lookup = self
            .lookup_ip(domain)
            .await
            .map_err(|err| DnsError::from_resolve(domain, err))?;
        Ok(lookup.iter().collect())
    }

    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError> {
        let lookup = self
            .mx_lookup(domain)
            .await
            .map_err(|err| DnsError::from_resolve(domain, err))?;
        let mut records = Vec::new();
        for mx in lookup.iter() {
            let exchange = normalize_exchange(mx.exchange().to_utf8());
            records.push(MxRecord::new(mx.preference(), exchange));
        }
        Ok(records)
    }
}
