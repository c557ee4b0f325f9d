/// Points granted per satisfied check.
pub const CHECK_WEIGHT: u8 = 25;

/// Minimum score for an address to be reported as likely valid.
pub const LIKELY_VALID_THRESHOLD: u8 = 75;

/// The four boolean signals the score is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckSignals {
    pub is_valid_syntax: bool,
    pub domain_exists: bool,
    pub has_mx_record: bool,
    pub is_disposable: bool,
}

impl CheckSignals {
    /// 25 points each for valid syntax, resolvable domain, MX presence and a
    /// non-disposable domain. Invalid syntax scores 0 regardless of the rest.
    pub fn score(&self) -> u8 {
        if !self.is_valid_syntax {
            return 0;
        }
        [
            self.is_valid_syntax,
            self.domain_exists,
            self.has_mx_record,
            !self.is_disposable,
        ]
        .into_iter()
        .filter(|satisfied| *satisfied)
        .map(|_| CHECK_WEIGHT)
        .sum()
    }
}

pub fn is_likely_valid(score: u8) -> bool {
    score >= LIKELY_VALID_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(domain: bool, mx: bool, disposable: bool) -> CheckSignals {
        CheckSignals {
            is_valid_syntax: true,
            domain_exists: domain,
            has_mx_record: mx,
            is_disposable: disposable,
        }
    }

    #[test]
    fn full_marks() {
        assert_eq!(signals(true, true, false).score(), 100);
    }

    #[test]
    fn one_missing_signal_still_likely_valid() {
        for s in [
            signals(false, true, false),
            signals(true, false, false),
            signals(true, true, true),
        ] {
            assert_eq!(s.score(), 75);
            assert!(is_likely_valid(s.score()));
        }
    }

    #[test]
    fn two_missing_signals_not_likely_valid() {
        let s = signals(false, false, false);
        assert_eq!(s.score(), 50);
        assert!(!is_likely_valid(s.score()));
        assert_eq!(signals(false, false, true).score(), 25);
    }

    #[test]
    fn invalid_syntax_scores_zero() {
        let s = CheckSignals {
            is_valid_syntax: false,
            domain_exists: true,
            has_mx_record: true,
            is_disposable: false,
        };
        assert_eq!(s.score(), 0);
    }
}
