//! Mutation helpers for prescription lifecycle transitions.

use super::RxFile;
use crate::engine::ValidationIssue;
use chrono::Utc;

impl RxFile {
    /// Create a fresh DRAFT record with template body.
    pub fn new_draft(id: impl Into<String>, doctor: impl Into<String>) -> Self {
        let mut frontmatter = super::RxFrontmatter {
            id: id.into(),
            doctor: doctor.into(),
            ..Default::default()
        };
        frontmatter.created = Some(Utc::now());

        Self {
            frontmatter,
            body: "\n## Notes\n".to_string(),
        }
    }

    /// Record validation results and mark the prescription as issued.
    pub fn mark_issued(&mut self, issues: Vec<ValidationIssue>, safety_score: u8) {
        self.frontmatter.issues = issues;
        self.frontmatter.safety_score = Some(safety_score);
        self.frontmatter.issued_at = Some(Utc::now());
    }

    /// Record the verifier and mark the prescription as dispensed.
    pub fn mark_dispensed(&mut self, verified_by: impl Into<String>) {
        self.frontmatter.verified_by = Some(verified_by.into());
        self.frontmatter.dispensed_at = Some(Utc::now());
    }

    /// Whether the record carries at least one medicine with a name.
    pub fn has_medicines(&self) -> bool {
        self.frontmatter
            .medicines
            .iter()
            .any(|m| !m.name.trim().is_empty())
    }
}
