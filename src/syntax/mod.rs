//! Pattern-based syntax check.
//!
//! [`verify_syntax`] is a permissive approximation of RFC 5322: quoted local
//! parts and IP-literal domains are rejected, some invalid addresses pass.

use std::sync::LazyLock;

use regex::Regex;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

// `$` matche uniquement la fin du texte (pas de tolérance pour un '\n' final)
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("static email pattern compiles"));

/// Returns `true` when the whole of `email` matches the address pattern.
pub fn verify_syntax(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Domain part of `email`: everything after the first `@`.
///
/// Returns `None` when there is no `@` or nothing follows it.
pub fn extract_domain(email: &str) -> Option<&str> {
    email
        .split_once('@')
        .map(|(_, domain)| domain)
        .filter(|domain| !domain.is_empty())
}
