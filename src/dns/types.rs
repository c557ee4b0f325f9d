use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MxRecord {
    pub preference: u16,
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}

/// Tri-state result of a network-dependent check.
///
/// `Unknown` means the lookup could not be completed (timeout, resolver
/// failure). It is never reported as a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckOutcome {
    Pass,
    Fail,
    Unknown { reason: String },
}

impl CheckOutcome {
    pub fn unknown(reason: impl Into<String>) -> Self {
        Self::Unknown {
            reason: reason.into(),
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn is_conclusive(&self) -> bool {
        !matches!(self, Self::Unknown { .. })
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str("pass"),
            Self::Fail => f.write_str("fail"),
            Self::Unknown { reason } => write!(f, "unknown ({reason})"),
        }
    }
}

/// Outcome of the A/AAAA lookup for the domain of an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostCheck {
    pub outcome: CheckOutcome,
    pub addresses: Vec<IpAddr>,
}

impl HostCheck {
    pub(crate) fn failed(outcome: CheckOutcome) -> Self {
        Self {
            outcome,
            addresses: Vec::new(),
        }
    }
}

/// Outcome of the MX lookup for the domain of an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MxCheck {
    pub outcome: CheckOutcome,
    pub records: Vec<MxRecord>,
}

impl MxCheck {
    pub(crate) fn failed(outcome: CheckOutcome) -> Self {
        Self {
            outcome,
            records: Vec::new(),
        }
    }
}
