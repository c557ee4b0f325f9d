use thiserror::Error;
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};

#[derive(Debug, Error)]
pub enum DnsError {
    #[error("no records found for {name}")]
    NoRecords { name: String },
    #[error("lookup timed out for {name}")]
    Timeout { name: String },
    #[error("lookup failed for {name}: {source}")]
    Lookup {
        name: String,
        #[source]
        source: ResolveError,
    },
}

impl DnsError {
    pub(crate) fn timeout(name: impl Into<String>) -> Self {
        Self::Timeout { name: name.into() }
    }

    /// Sorts a resolver error into "definitively absent" (NXDOMAIN, empty
    /// answer), timeout, or anything else.
    pub(crate) fn from_resolve(name: impl Into<String>, source: ResolveError) -> Self {
        let name = name.into();
        match source.kind() {
            ResolveErrorKind::NoRecordsFound { .. } => Self::NoRecords { name },
            ResolveErrorKind::Timeout => Self::Timeout { name },
            _ => Self::Lookup { name, source },
        }
    }

    /// `true` when the error proves the record does not exist, as opposed to
    /// a lookup that could not complete.
    pub fn is_definitive(&self) -> bool {
        matches!(self, Self::NoRecords { .. })
    }
}
