//! DNS checks: domain resolution (A/AAAA) and MX presence.
//!
//! Both checks extract the domain after the first `@` and query it through a
//! [`DnsLookup`]. A missing domain, NXDOMAIN or an empty answer is a definitive
//! [`CheckOutcome::Fail`]; a timeout or resolver failure is
//! [`CheckOutcome::Unknown`]. Neither ever surfaces as an error.

mod error;
mod resolver;
mod types;

pub use error::DnsError;
pub use resolver::{DnsLookup, ResolverSettings, build_resolver};
pub use types::{CheckOutcome, HostCheck, MxCheck, MxRecord};

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::syntax::extract_domain;

/// Per-query resolver timeout when the caller gives none.
pub const DEFAULT_DNS_TIMEOUT: Duration = Duration::from_secs(5);

/// Queries the resolver sends before giving up on a name.
pub const DEFAULT_DNS_ATTEMPTS: usize = 2;

/// Upper bound for a whole check: every resolver attempt gets its full
/// per-query `timeout`.
pub fn check_budget(timeout: Option<Duration>, attempts: usize) -> Option<Duration> {
    let attempts = u32::try_from(attempts.max(1)).unwrap_or(u32::MAX);
    timeout.map(|limit| limit.saturating_mul(attempts))
}

/// `true` when the domain of `email` resolves to at least one address.
pub async fn verify_domain<L>(lookup: &L, email: &str) -> bool
where
    L: DnsLookup + ?Sized,
{
    let budget = check_budget(Some(DEFAULT_DNS_TIMEOUT), DEFAULT_DNS_ATTEMPTS);
    check_host(lookup, email, budget)
        .await
        .outcome
        .passed()
}

/// `true` when the domain of `email` publishes at least one MX record.
pub async fn verify_mx_record<L>(lookup: &L, email: &str) -> bool
where
    L: DnsLookup + ?Sized,
{
    let budget = check_budget(Some(DEFAULT_DNS_TIMEOUT), DEFAULT_DNS_ATTEMPTS);
    check_mx(lookup, email, budget)
        .await
        .outcome
        .passed()
}

/// Forward resolution of the domain of `email`, bounded by `timeout`.
pub async fn check_host<L>(lookup: &L, email: &str, timeout: Option<Duration>) -> HostCheck
where
    L: DnsLookup + ?Sized,
{
    let Some(domain) = extract_domain(email) else {
        return HostCheck::failed(CheckOutcome::Fail);
    };

    match bounded(timeout, domain, lookup.lookup_host(domain)).await {
        Ok(addresses) if !addresses.is_empty() => {
            debug!(domain, count = addresses.len(), "domain resolved");
            HostCheck {
                outcome: CheckOutcome::Pass,
                addresses,
            }
        }
        Ok(_) => {
            debug!(domain, "domain resolved to no address");
            HostCheck::failed(CheckOutcome::Fail)
        }
        Err(err) => HostCheck::failed(outcome_for_error("A/AAAA", domain, &err)),
    }
}

/// MX lookup for the domain of `email`, bounded by `timeout`. Records come
/// back sorted by preference and deduplicated.
pub async fn check_mx<L>(lookup: &L, email: &str, timeout: Option<Duration>) -> MxCheck
where
    L: DnsLookup + ?Sized,
{
    let Some(domain) = extract_domain(email) else {
        return MxCheck::failed(CheckOutcome::Fail);
    };

    match bounded(timeout, domain, lookup.lookup_mx(domain)).await {
        Ok(mut records) if !records.is_empty() => {
            records.sort();
            records.dedup();
            debug!(domain, count = records.len(), "MX records found");
            MxCheck {
                outcome: CheckOutcome::Pass,
                records,
            }
        }
        Ok(_) => {
            debug!(domain, "no MX record");
            MxCheck::failed(CheckOutcome::Fail)
        }
        Err(err) => MxCheck::failed(outcome_for_error("MX", domain, &err)),
    }
}

async fn bounded<T, F>(timeout: Option<Duration>, domain: &str, lookup: F) -> Result<T, DnsError>
where
    F: Future<Output = Result<T, DnsError>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, lookup)
            .await
            .unwrap_or_else(|_| Err(DnsError::timeout(domain))),
        None => lookup.await,
    }
}

fn outcome_for_error(query: &str, domain: &str, err: &DnsError) -> CheckOutcome {
    if err.is_definitive() {
        debug!(domain, query, error = %err, "record absent");
        CheckOutcome::Fail
    } else {
        warn!(domain, query, error = %err, "lookup inconclusive");
        CheckOutcome::unknown(err.to_string())
    }
}

#[cfg(test)]
pub(crate) mod tests;
