//! Verification engine.
//!
//! [`EmailVerifier`] runs the syntax check first and stops there on failure.
//! Otherwise the domain, MX and disposable checks run concurrently and their
//! results are folded into a [`VerificationResult`] by [`CheckSignals::score`].

mod error;
mod options;
mod score;
mod types;

pub use error::{ConfigError, VerifierError};
pub use options::VerifierOptions;
pub use score::{CHECK_WEIGHT, CheckSignals, LIKELY_VALID_THRESHOLD, is_likely_valid};
pub use types::{VerificationReport, VerificationResult};

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};
use trust_dns_resolver::TokioAsyncResolver;

use crate::dns::{self, DnsLookup};
use crate::registry::{DisposableRegistry, DomainListSource, FileListSource, HttpListSource};
use crate::syntax::{extract_domain, verify_syntax};

/// Verifies addresses against DNS and a disposable-domain list loaded once at
/// construction. Cheap to share: wrap it in an `Arc` and call it from any task.
pub struct EmailVerifier<L = TokioAsyncResolver> {
    lookup: L,
    registry: Arc<DisposableRegistry>,
    options: VerifierOptions,
}

impl EmailVerifier<TokioAsyncResolver> {
    /// Builds the system resolver and loads the disposable-domain registry.
    ///
    /// A registry that cannot be fetched leaves the verifier with an empty
    /// list, unless [`VerifierOptions::registry_required`] is set; that is the
    /// only way this fails.
    pub async fn new(options: VerifierOptions) -> Result<Self, VerifierError> {
        let resolver = dns::build_resolver(&options.resolver_settings());
        let registry = load_registry(&options).await?;
        Ok(Self::with_parts(resolver, registry, options))
    }

    pub async fn with_defaults() -> Result<Self, VerifierError> {
        Self::new(VerifierOptions::default()).await
    }
}

impl<L> EmailVerifier<L>
where
    L: DnsLookup,
{
    pub fn with_parts(
        lookup: L,
        registry: impl Into<Arc<DisposableRegistry>>,
        options: VerifierOptions,
    ) -> Self {
        Self {
            lookup,
            registry: registry.into(),
            options,
        }
    }

    pub fn registry(&self) -> &DisposableRegistry {
        &self.registry
    }

    pub fn options(&self) -> &VerifierOptions {
        &self.options
    }

    pub fn verify_syntax(&self, email: &str) -> bool {
        verify_syntax(email)
    }

    pub async fn verify_domain(&self, email: &str) -> bool {
        dns::check_host(&self.lookup, email, self.options.dns_check_timeout())
            .await
            .outcome
            .passed()
    }

    pub async fn verify_mx_record(&self, email: &str) -> bool {
        dns::check_mx(&self.lookup, email, self.options.dns_check_timeout())
            .await
            .outcome
            .passed()
    }

    pub fn is_disposable(&self, email: &str) -> bool {
        self.registry.contains_email(email)
    }

    /// Runs every check on `email` and returns the flat verdict.
    pub async fn verify_email(&self, email: &str) -> VerificationResult {
        self.verify_email_detailed(email).await.result
    }

    /// Same as [`verify_email`](Self::verify_email), keeping the tri-state
    /// DNS outcomes and the records found.
    pub async fn verify_email_detailed(&self, email: &str) -> VerificationReport {
        if !verify_syntax(email) {
            debug!(email, "syntax check failed, skipping DNS");
            return VerificationReport::syntax_rejected(email);
        }

        let timeout = self.options.dns_check_timeout();
        let (host, mx, is_disposable) = tokio::join!(
            dns::check_host(&self.lookup, email, timeout),
            dns::check_mx(&self.lookup, email, timeout),
            async { self.registry.contains_email(email) },
        );

        let report =
            VerificationReport::from_checks(email, extract_domain(email), host, mx, is_disposable);
        debug!(
            email,
            score = report.result.overall_score,
            likely_valid = report.result.is_likely_valid,
            "verification done"
        );
        report
    }

    /// Verifies a batch with at most [`VerifierOptions::concurrency`]
    /// addresses in flight. Reports come back in input order.
    pub async fn verify_many<I>(&self, emails: I) -> Vec<VerificationReport>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        stream::iter(emails)
            .map(|email| async move { self.verify_email_detailed(email.as_ref()).await })
            .buffered(self.options.effective_concurrency())
            .collect()
            .await
    }
}

async fn load_registry(options: &VerifierOptions) -> Result<DisposableRegistry, VerifierError> {
    if !options.registry_enabled {
        debug!("disposable-domain registry disabled");
        return Ok(DisposableRegistry::empty());
    }

    let source: Box<dyn DomainListSource> = match &options.registry_file {
        Some(path) => Box::new(FileListSource::new(path)),
        None => match HttpListSource::new(&options.registry_url, options.registry_timeout()) {
            Ok(source) => Box::new(source),
            Err(err) if options.registry_required => return Err(VerifierError::registry(err)),
            Err(err) => {
                warn!(error = %err, "disposable-domain registry unavailable, continuing with an empty list");
                return Ok(DisposableRegistry::empty());
            }
        },
    };

    if options.registry_required {
        DisposableRegistry::try_load(source.as_ref())
            .await
            .map_err(VerifierError::registry)
    } else {
        Ok(DisposableRegistry::load(source.as_ref()).await)
    }
}
