//! Classification of a single trajectory run.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::partition::HUMPS;

/// Result of classifying one `(partition, leftend)` pair.
///
/// All four variants are expected, data-dependent results. Only
/// [`Outcome::Overflow`] signals a limitation of the run itself: the
/// coefficient window capacity was too small for these parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Fixed point reached with zero norm after the full distance.
    Complete,
    /// Fixed point reached with zero norm before the full distance.
    Partial,
    /// Non-zero norm at the fixed point, or abandoned by the loop guard.
    Failure,
    /// Level left the coefficient window before any fixed point.
    Overflow,
}

impl Outcome {
    /// Letter written to the research log, `None` for unlogged failures.
    pub const fn log_code(self) -> Option<char> {
        match self {
            Self::Complete => Some('V'),
            Self::Partial => Some('v'),
            Self::Overflow => Some('o'),
            Self::Failure => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Partial => "partial",
            Self::Failure => "failure",
            Self::Overflow => "overflow",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-failure classification worth reporting.
///
/// Only [`Finding::from_outcome`] builds one, so the log code is always one
/// of `V`, `v` or `o`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Finding {
    widths: [u32; HUMPS],
    leftend: i64,
    outcome: Outcome,
    code: char,
}

impl Finding {
    /// Wrap a classification, discarding failures.
    pub const fn from_outcome(widths: [u32; HUMPS], leftend: i64, outcome: Outcome) -> Option<Self> {
        match outcome.log_code() {
            Some(code) => Some(Self {
                widths,
                leftend,
                outcome,
                code,
            }),
            None => None,
        }
    }

    pub const fn widths(&self) -> [u32; HUMPS] {
        self.widths
    }

    pub const fn leftend(&self) -> i64 {
        self.leftend
    }

    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Log code of the wrapped outcome.
    pub const fn code(&self) -> char {
        self.code
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [w0, w1, w2] = self.widths;
        write!(
            f,
            "Error {}: widths {w0},{w1},{w2}, leftend {}",
            self.code, self.leftend
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_codes() {
        assert_eq!(Outcome::Complete.log_code(), Some('V'));
        assert_eq!(Outcome::Partial.log_code(), Some('v'));
        assert_eq!(Outcome::Overflow.log_code(), Some('o'));
        assert_eq!(Outcome::Failure.log_code(), None);
    }

    #[test]
    fn test_failure_is_not_a_finding() {
        assert!(Finding::from_outcome([3, 0, 5], 2, Outcome::Failure).is_none());
    }

    #[test]
    fn test_finding_code_follows_outcome() {
        for outcome in [Outcome::Complete, Outcome::Partial, Outcome::Overflow] {
            let finding = Finding::from_outcome([13, 36, 35], 28, outcome).unwrap();
            assert_eq!(Some(finding.code()), outcome.log_code());
            assert_eq!(finding.outcome(), outcome);
            assert_eq!(finding.widths(), [13, 36, 35]);
            assert_eq!(finding.leftend(), 28);
        }
    }

    #[test]
    fn test_finding_line_format() {
        let finding = Finding::from_outcome([701, 2, 597], 649, Outcome::Overflow).unwrap();
        assert_eq!(finding.to_string(), "Error o: widths 701,2,597, leftend 649");

        let finding = Finding::from_outcome([3, 0, 1], 0, Outcome::Complete).unwrap();
        assert_eq!(finding.to_string(), "Error V: widths 3,0,1, leftend 0");
    }

    #[test]
    fn test_outcome_serializes_snake_case() {
        let json = serde_json::to_string(&Outcome::Overflow).unwrap();
        assert_eq!(json, "\"overflow\"");
    }
}
