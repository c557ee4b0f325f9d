use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use super::score::{CheckSignals, is_likely_valid};
use crate::dns::{CheckOutcome, HostCheck, MxCheck, MxRecord};

/// Flat verdict for one address. Field names are the JSON wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub email: String,
    pub is_valid_syntax: bool,
    pub domain_exists: bool,
    pub has_mx_record: bool,
    pub is_disposable: bool,
    pub overall_score: u8,
    pub is_likely_valid: bool,
}

impl VerificationResult {
    /// Result for an address that failed the syntax check: everything false,
    /// score 0.
    pub fn syntax_rejected(email: impl Into<String>) -> Self {
        Self::from_signals(email, CheckSignals::default())
    }

    pub fn from_signals(email: impl Into<String>, signals: CheckSignals) -> Self {
        // pas de signal réseau sans syntaxe valide
        let signals = if signals.is_valid_syntax {
            signals
        } else {
            CheckSignals::default()
        };
        let overall_score = signals.score();
        Self {
            email: email.into(),
            is_valid_syntax: signals.is_valid_syntax,
            domain_exists: signals.domain_exists,
            has_mx_record: signals.has_mx_record,
            is_disposable: signals.is_disposable,
            overall_score,
            is_likely_valid: is_likely_valid(overall_score),
        }
    }

    pub fn signals(&self) -> CheckSignals {
        CheckSignals {
            is_valid_syntax: self.is_valid_syntax,
            domain_exists: self.domain_exists,
            has_mx_record: self.has_mx_record,
            is_disposable: self.is_disposable,
        }
    }
}

/// [`VerificationResult`] plus the tri-state outcome of each DNS check and
/// what the lookups returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    #[serde(flatten)]
    pub result: VerificationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_check: Option<CheckOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mx_check: Option<CheckOutcome>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<IpAddr>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mx_records: Vec<MxRecord>,
}

impl VerificationReport {
    /// Report for an address that never reached the DNS stage.
    pub(crate) fn syntax_rejected(email: &str) -> Self {
        Self {
            result: VerificationResult::syntax_rejected(email),
            domain: None,
            domain_check: None,
            mx_check: None,
            addresses: Vec::new(),
            mx_records: Vec::new(),
        }
    }

    pub(crate) fn from_checks(
        email: &str,
        domain: Option<&str>,
        host: HostCheck,
        mx: MxCheck,
        is_disposable: bool,
    ) -> Self {
        let signals = CheckSignals {
            is_valid_syntax: true,
            domain_exists: host.outcome.passed(),
            has_mx_record: mx.outcome.passed(),
            is_disposable,
        };
        Self {
            result: VerificationResult::from_signals(email, signals),
            domain: domain.map(str::to_string),
            domain_check: Some(host.outcome),
            mx_check: Some(mx.outcome),
            addresses: host.addresses,
            mx_records: mx.records,
        }
    }

    /// `true` when every DNS check that ran reached a definite answer.
    pub fn is_conclusive(&self) -> bool {
        [&self.domain_check, &self.mx_check]
            .into_iter()
            .flatten()
            .all(CheckOutcome::is_conclusive)
    }
}

impl From<VerificationReport> for VerificationResult {
    fn from(report: VerificationReport) -> Self {
        report.result
    }
}
