use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use trust_dns_resolver::config::ResolverConfig;

use super::{
    CheckOutcome, DnsError, DnsLookup, MxRecord, ResolverSettings, check_budget, check_host,
    check_mx, resolver, verify_domain, verify_mx_record,
};

type HostResult = Result<Vec<IpAddr>, DnsError>;
type MxResult = Result<Vec<MxRecord>, DnsError>;
type HostFn = dyn Fn(&str) -> HostResult + Send + Sync;
type MxFn = dyn Fn(&str) -> MxResult + Send + Sync;

/// Scriptable [`DnsLookup`]. Defaults to NXDOMAIN for everything and counts
/// every call so callers can assert that no lookup happened.
pub(crate) struct StubLookup {
    on_host: Box<HostFn>,
    on_mx: Box<MxFn>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StubLookup {
    pub(crate) fn new() -> Self {
        Self {
            on_host: Box::new(|domain| {
                Err(DnsError::NoRecords {
                    name: domain.to_string(),
                })
            }),
            on_mx: Box::new(|domain| {
                Err(DnsError::NoRecords {
                    name: domain.to_string(),
                })
            }),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn on_host<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> HostResult + Send + Sync + 'static,
    {
        self.on_host = Box::new(f);
        self
    }

    pub(crate) fn on_mx<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> MxResult + Send + Sync + 'static,
    {
        self.on_mx = Box::new(f);
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Domain resolving to one address and one MX host.
    pub(crate) fn healthy() -> Self {
        Self::new()
            .on_host(|_| Ok(vec![IpAddr::V4(Ipv4Addr::new(192, 0, 2, 10))]))
            .on_mx(|domain| Ok(vec![MxRecord::new(10, format!("mx.{domain}"))]))
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl DnsLookup for StubLookup {
    async fn lookup_host(&self, domain: &str) -> Result<Vec<IpAddr>, DnsError> {
        self.pause().await;
        (self.on_host)(domain)
    }

    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError> {
        self.pause().await;
        (self.on_mx)(domain)
    }
}

#[test]
fn normalize_exchange_trims_dot_and_lowercases() {
    let out = resolver::normalize_exchange("Mail.EXAMPLE.com.".to_string());
    assert_eq!(out, "mail.example.com");
}

#[test]
fn unreadable_system_conf_falls_back_to_defaults() {
    let settings = ResolverSettings {
        timeout: Some(Duration::from_millis(750)),
        attempts: 3,
        nameservers: Vec::new(),
    };
    let (config, opts) = resolver::resolver_config(&settings, || {
        Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "directive at line 0 is not recognized",
        ))
    });

    assert_eq!(
        config.name_servers().len(),
        ResolverConfig::default().name_servers().len()
    );
    assert!(!config.name_servers().is_empty());
    assert_eq!(opts.timeout, Duration::from_millis(750));
    assert_eq!(opts.attempts, 3);
}

#[test]
fn explicit_nameservers_skip_system_conf() {
    let settings = ResolverSettings {
        nameservers: vec![IpAddr::V4(Ipv4Addr::LOCALHOST)],
        ..ResolverSettings::default()
    };
    let (config, opts) = resolver::resolver_config(&settings, || {
        panic!("system configuration must not be read")
    });

    // one UDP and one TCP entry
    assert_eq!(config.name_servers().len(), 2);
    assert!(
        config
            .name_servers()
            .iter()
            .all(|ns| ns.socket_addr.ip() == IpAddr::V4(Ipv4Addr::LOCALHOST))
    );
    assert_eq!(opts.attempts, 2);
}

#[test]
fn check_budget_covers_every_attempt() {
    let per_query = Some(Duration::from_millis(100));
    assert_eq!(check_budget(per_query, 3), Some(Duration::from_millis(300)));
    assert_eq!(check_budget(per_query, 0), per_query);
    assert_eq!(check_budget(None, 2), None);
}

#[test]
fn only_absence_errors_are_definitive() {
    assert!(
        DnsError::NoRecords {
            name: "example.com".into()
        }
        .is_definitive()
    );
    assert!(!DnsError::timeout("example.com").is_definitive());
}

#[tokio::test]
async fn host_check_passes_with_addresses() {
    let stub = StubLookup::healthy();
    let check = check_host(&stub, "user@example.com", None).await;
    assert_eq!(check.outcome, CheckOutcome::Pass);
    assert_eq!(check.addresses.len(), 1);
}

#[tokio::test]
async fn host_check_queries_domain_part() {
    let stub = StubLookup::new().on_host(|domain| {
        assert_eq!(domain, "example.org");
        Ok(vec![IpAddr::V4(Ipv4Addr::LOCALHOST)])
    });
    assert!(verify_domain(&stub, "someone@example.org").await);
}

#[tokio::test]
async fn missing_domain_fails_without_lookup() {
    let stub = StubLookup::healthy();
    assert!(!verify_domain(&stub, "no-at-sign").await);
    assert!(!verify_mx_record(&stub, "user@").await);
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn nxdomain_is_definitive_fail() {
    let stub = StubLookup::new();
    let host = check_host(&stub, "user@nonexistent-domain-xyz123.invalid", None).await;
    let mx = check_mx(&stub, "user@nonexistent-domain-xyz123.invalid", None).await;
    assert_eq!(host.outcome, CheckOutcome::Fail);
    assert_eq!(mx.outcome, CheckOutcome::Fail);
}

#[tokio::test]
async fn empty_answer_is_fail() {
    let stub = StubLookup::new()
        .on_host(|_| Ok(Vec::new()))
        .on_mx(|_| Ok(Vec::new()));
    assert_eq!(
        check_host(&stub, "a@example.com", None).await.outcome,
        CheckOutcome::Fail
    );
    assert_eq!(
        check_mx(&stub, "a@example.com", None).await.outcome,
        CheckOutcome::Fail
    );
}

#[tokio::test]
async fn resolver_timeout_is_unknown() {
    let stub = StubLookup::new().on_mx(|domain| Err(DnsError::timeout(domain)));
    let check = check_mx(&stub, "a@example.com", None).await;
    assert!(matches!(check.outcome, CheckOutcome::Unknown { .. }));
    assert!(!check.outcome.passed());
    assert!(!check.outcome.is_conclusive());
}

#[tokio::test]
async fn slow_lookup_is_cut_by_timeout() {
    let stub = StubLookup::healthy().with_delay(Duration::from_millis(500));
    let check = check_host(&stub, "a@example.com", Some(Duration::from_millis(20))).await;
    match check.outcome {
        CheckOutcome::Unknown { reason } => assert!(reason.contains("timed out"), "{reason}"),
        other => panic!("expected unknown outcome, got {other:?}"),
    }
    assert!(check.addresses.is_empty());
}

#[tokio::test]
async fn mx_records_sorted_and_deduped() {
    let stub = StubLookup::new().on_mx(|_| {
        Ok(vec![
            MxRecord::new(20, "mx2.example.com"),
            MxRecord::new(10, "mx1.example.com"),
            MxRecord::new(10, "mx1.example.com"),
            MxRecord::new(30, "mx3.example.com"),
        ])
    });

    let check = check_mx(&stub, "user@example.com", None).await;
    assert_eq!(check.outcome, CheckOutcome::Pass);
    assert_eq!(check.records.len(), 3);
    assert_eq!(check.records[0].exchange, "mx1.example.com");
    assert_eq!(check.records[2].preference, 30);
}

#[tokio::test]
async fn host_and_mx_are_independent() {
    let stub = StubLookup::new().on_host(|_| Ok(vec![IpAddr::V4(Ipv4Addr::LOCALHOST)]));
    assert!(verify_domain(&stub, "a@example.com").await);
    assert!(!verify_mx_record(&stub, "a@example.com").await);
}

#[test]
fn outcome_display() {
    assert_eq!(CheckOutcome::Pass.to_string(), "pass");
    assert_eq!(
        CheckOutcome::unknown("lookup timed out").to_string(),
        "unknown (lookup timed out)"
    );
}
