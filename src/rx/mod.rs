//! Prescription record model for scrip.
//!
//! This module provides parsing and serialization of prescription files,
//! which use YAML frontmatter followed by a markdown body (doctor notes).
//! The implementation supports:
//!
//! - Round-trip preservation of unknown YAML fields (forward compatibility)
//! - Preservation of markdown body content
//! - Common mutation helpers for lifecycle transitions
//!
//! # Prescription File Format
//!
//! Prescription files use YAML frontmatter delimited by `---` lines:
//!
//! ```text
//! ---
//! id: RX-001
//! doctor: Dr. Mehta
//! patient:
//!   id: "9876543210"
//!   age: 34
//!   gender: female
//!   allergies: [penicillin]
//! medicines:
//!   - name: Paracetamol
//!     dosage: 500mg
//!     frequency: 1-0-1
//!     duration: 5 days
//! ---
//!
//! ## Notes
//! Take after food.
//! ```

use crate::engine::ValidationIssue;
use crate::error::{Result, ScripError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

mod io;
mod mutations;

/// Patient age groups used by age-restriction rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Child,
    Adult,
    Elderly,
}

impl AgeGroup {
    /// Parse an age group from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "child" => Some(Self::Child),
            "adult" => Some(Self::Adult),
            "elderly" => Some(Self::Elderly),
            _ => None,
        }
    }

    /// Derive an age group from a numeric age in years.
    pub fn from_age(age: u32) -> Self {
        if age < 13 {
            Self::Child
        } else if age >= 65 {
            Self::Elderly
        } else {
            Self::Adult
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgeGroup::Child => write!(f, "child"),
            AgeGroup::Adult => write!(f, "adult"),
            AgeGroup::Elderly => write!(f, "elderly"),
        }
    }
}

/// Patient gender used by contraindication rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

impl Gender {
    /// Parse a gender from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
            Gender::Other => write!(f, "other"),
        }
    }
}

/// Patient details embedded in prescription frontmatter.
///
/// Immutable input to validation; the engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Patient {
    /// Patient identifier (chart number, phone, or free text).
    #[serde(default)]
    pub id: String,

    /// Numeric age in years, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    /// Explicit age group. When absent, derived from `age`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_group: Option<AgeGroup>,

    /// Patient gender.
    #[serde(default)]
    pub gender: Gender,

    /// Known allergies (free text, matched case-insensitively).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allergies: Vec<String>,

    /// Recorded symptoms text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub symptoms: String,
}

impl Patient {
    /// The effective age group: explicit group wins, else derived from age.
    ///
    /// Returns `None` when neither is recorded; group-based restriction
    /// checks are skipped in that case.
    pub fn effective_age_group(&self) -> Option<AgeGroup> {
        self.age_group.or_else(|| self.age.map(AgeGroup::from_age))
    }
}

/// A prescribed medicine line.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Medicine {
    /// Medicine name (free text).
    pub name: String,

    /// Dosage (free text, may carry a leading numeric magnitude, e.g. "500mg").
    #[serde(default)]
    pub dosage: String,

    /// Intake frequency (e.g. "1-0-1").
    #[serde(default)]
    pub frequency: String,

    /// Duration (e.g. "5 days").
    #[serde(default)]
    pub duration: String,

    /// Optional intake instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// A parsed prescription file with frontmatter and markdown body.
#[derive(Debug, Clone)]
pub struct RxFile {
    /// The parsed frontmatter fields.
    pub frontmatter: RxFrontmatter,
    /// The markdown body content (everything after the closing `---`).
    pub body: String,
}

/// Prescription frontmatter fields.
///
/// Known fields are explicitly typed, while unknown fields are preserved
/// in the `extra` map for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RxFrontmatter {
    // =========================================================================
    // Required fields
    // =========================================================================
    /// Prescription identifier (e.g., "RX-001").
    pub id: String,

    /// Prescribing doctor's name.
    pub doctor: String,

    // =========================================================================
    // Issuer details
    // =========================================================================
    /// Hospital or clinic name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital: Option<String>,

    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    // =========================================================================
    // Clinical content
    // =========================================================================
    /// Patient details.
    #[serde(default)]
    pub patient: Patient,

    /// Prescribed medicines.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub medicines: Vec<Medicine>,

    // =========================================================================
    // Lifecycle timestamps
    // =========================================================================
    /// When the prescription was issued (moved to ISSUED).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,

    /// When the prescription was dispensed (moved to DISPENSED).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispensed_at: Option<DateTime<Utc>>,

    /// Who verified and dispensed the prescription (e.g., "pharmacist@HOST").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,

    // =========================================================================
    // Stored validation results
    // =========================================================================
    /// Safety issues recorded at issue time.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ValidationIssue>,

    /// Safety score (0-100) recorded at issue time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_score: Option<u8>,

    // =========================================================================
    // Unknown fields (forward compatibility)
    // =========================================================================
    /// Any fields not explicitly defined above.
    /// Using BTreeMap for deterministic serialization order.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for RxFrontmatter {
    fn default() -> Self {
        Self {
            id: String::new(),
            doctor: String::new(),
            hospital: None,
            created: None,
            patient: Patient::default(),
            medicines: Vec::new(),
            issued_at: None,
            dispensed_at: None,
            verified_by: None,
            issues: Vec::new(),
            safety_score: None,
            extra: BTreeMap::new(),
        }
    }
}

impl RxFile {
    /// Parse a prescription file from its content string.
    ///
    /// The content must have YAML frontmatter delimited by `---` lines,
    /// followed by an optional markdown body. Windows (CRLF) line endings
    /// are normalized to LF.
    pub fn parse(content: &str) -> Result<Self> {
        let normalized = content.replace("\r\n", "\n");

        if !normalized.starts_with("---") {
            return Err(ScripError::UserError(
                "prescription file must start with '---' frontmatter delimiter".to_string(),
            ));
        }

        let first_newline = normalized.find('\n').ok_or_else(|| {
            ScripError::UserError("prescription file frontmatter is incomplete".to_string())
        })?;

        let rest = &normalized[first_newline + 1..];
        let closing_pos = rest.find("\n---").ok_or_else(|| {
            ScripError::UserError(
                "prescription file missing closing '---' frontmatter delimiter".to_string(),
            )
        })?;

        let frontmatter_yaml = &rest[..closing_pos];

        let frontmatter: RxFrontmatter = serde_yaml::from_str(frontmatter_yaml).map_err(|e| {
            ScripError::UserError(format!("failed to parse prescription frontmatter: {}", e))
        })?;

        // Body starts after the closing delimiter line, skipping one newline.
        let after_delimiter = closing_pos + "\n---".len();
        let body = match rest[after_delimiter..].strip_prefix('\n') {
            Some(b) => b.to_string(),
            None => rest[after_delimiter..].to_string(),
        };

        Ok(Self { frontmatter, body })
    }
}
