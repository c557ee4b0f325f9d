#![forbid(unsafe_code)]
//! mailverify_lib — vérification d'adresses e-mail sans envoi.
//!
//! Four independent checks are combined into a score out of 100:
//! syntax, domain resolution, MX presence and disposable-domain membership.
//!
//! ```no_run
//! # async fn run() -> Result<(), mailverify_lib::VerifierError> {
//! use mailverify_lib::{EmailVerifier, VerifierOptions};
//!
//! let verifier = EmailVerifier::new(VerifierOptions::default()).await?;
//! let result = verifier.verify_email("alice@example.com").await;
//! println!("{} -> {}", result.email, result.overall_score);
//! # Ok(())
//! # }
//! ```

pub mod dns;
pub mod registry;
pub mod syntax;
pub mod verifier;

pub use dns::{CheckOutcome, DnsError, DnsLookup, MxRecord, verify_domain, verify_mx_record};
pub use registry::{
    DEFAULT_REGISTRY_URL, DisposableRegistry, DomainListSource, FileListSource, HttpListSource,
    RegistryError,
};
pub use syntax::verify_syntax;
pub use verifier::{
    CheckSignals, ConfigError, EmailVerifier, VerificationReport, VerificationResult,
    VerifierError, VerifierOptions,
};
