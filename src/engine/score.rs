//! Safety score derivation.
//!
//! The score is a simple linear deduction model: start at 100, subtract a
//! fixed amount per issue depending on severity, floor at 0. No issue
//! affects another's deduction.

use crate::rules::Deductions;

use super::issue::ValidationIssue;

/// Derive the 0-100 safety score from a list of issues.
pub fn safety_score(issues: &[ValidationIssue], deductions: &Deductions) -> u8 {
    let total: u32 = issues
        .iter()
        .map(|issue| deductions.for_severity(issue.severity))
        .sum();

    100u32.saturating_sub(total) as u8
}

/// Coarse rating bands for presenting a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyRating {
    /// 80-100
    Good,
    /// 60-79
    Fair,
    /// 40-59
    Caution,
    /// 0-39
    Poor,
}

impl SafetyRating {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            Self::Good
        } else if score >= 60 {
            Self::Fair
        } else if score >= 40 {
            Self::Caution
        } else {
            Self::Poor
        }
    }
}

impl std::fmt::Display for SafetyRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SafetyRating::Good => write!(f, "good"),
            SafetyRating::Fair => write!(f, "fair"),
            SafetyRating::Caution => write!(f, "caution"),
            SafetyRating::Poor => write!(f, "poor"),
        }
    }
}
