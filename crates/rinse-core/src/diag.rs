use derive_more::Deref;
use std::fmt;

///
/// Warning
///
/// Soft evaluation failures. A mismatched clause makes the record a
/// non-match instead of failing the whole query; the mismatch is recorded
/// here so callers can observe it per call.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Warning {
    /// A numeric filter was applied to a non-number record value.
    NumericComparisonOnNonNumber {
        path: String,
        filter: &'static str,
    },
    /// `$isOneOf` / `$isNotOneOf` was applied to an array record value.
    OneOfAppliedToList {
        path: String,
        filter: &'static str,
    },
    /// `$isSubsetOf` / `$isSupersetOf` was applied to a non-array record value.
    SetComparisonOnScalar {
        path: String,
        filter: &'static str,
    },
    /// The operand itself had the wrong shape for the filter.
    MalformedOperand {
        path: String,
        filter: &'static str,
        expected: &'static str,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumericComparisonOnNonNumber { path, filter } => write!(
                f,
                "{filter} on '{path}': numeric filters require a number value"
            ),
            Self::OneOfAppliedToList { path, filter } => write!(
                f,
                "{filter} on '{path}': value is an array, use $isSubsetOf or $isSupersetOf instead"
            ),
            Self::SetComparisonOnScalar { path, filter } => write!(
                f,
                "{filter} on '{path}': value is not an array, use $isOneOf for scalar membership"
            ),
            Self::MalformedOperand {
                path,
                filter,
                expected,
            } => write!(f, "{filter} on '{path}': operand must be {expected}"),
        }
    }
}

///
/// Diagnostics
///
/// Per-call warning sink passed into evaluation. Replaces any process-wide
/// logger state so warning emission stays deterministic and testable.
///

#[derive(Clone, Debug, Default, Deref, Eq, PartialEq)]
pub struct Diagnostics {
    #[deref]
    warnings: Vec<Warning>,
}

impl Diagnostics {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Drain the collected warnings, leaving the sink empty for reuse.
    pub fn take(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    /// Write every collected warning to stderr.
    pub fn emit(&self) {
        for warning in &self.warnings {
            eprintln!("[rinse] {warning}");
        }
    }
}
