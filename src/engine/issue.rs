//! Core types for validation issues.

use serde::{Deserialize, Serialize};

/// Ordinal risk level attached to a detected issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::High => write!(f, "HIGH"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::Low => write!(f, "LOW"),
        }
    }
}

/// The category of check that produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Age,
    Gender,
    Interaction,
    Dosage,
    Allergy,
    Mismatch,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueKind::Age => write!(f, "age"),
            IssueKind::Gender => write!(f, "gender"),
            IssueKind::Interaction => write!(f, "interaction"),
            IssueKind::Dosage => write!(f, "dosage"),
            IssueKind::Allergy => write!(f, "allergy"),
            IssueKind::Mismatch => write!(f, "mismatch"),
        }
    }
}

/// A detected safety issue.
///
/// Output-only: issues are created by checks, never mutated afterwards.
/// Serialized into prescription frontmatter when a record is issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Risk level.
    pub severity: Severity,

    /// Category of the issue.
    pub kind: IssueKind,

    /// Human-readable description.
    pub message: String,

    /// Implicated medicine name(s), e.g. "Aspirin" or "Aspirin + Warfarin".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medicine: Option<String>,
}

impl ValidationIssue {
    pub fn new(severity: Severity, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            medicine: None,
        }
    }

    pub fn with_medicine(mut self, medicine: impl Into<String>) -> Self {
        self.medicine = Some(medicine.into());
        self
    }
}
