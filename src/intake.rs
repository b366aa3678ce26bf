//! Dose intake log and adherence computation.
//!
//! Intake records are appended to `.scrip/intake.ndjson`, one JSON object
//! per line, mirroring the events log format. The `adherence` command folds
//! them into per-medicine and overall compliance percentages.

use crate::context::StoreContext;
use crate::error::{Result, ScripError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;

/// Outcome of a scheduled dose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntakeStatus {
    Taken,
    Missed,
    Delayed,
}

impl IntakeStatus {
    /// Parse an intake status from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "taken" => Some(Self::Taken),
            "missed" => Some(Self::Missed),
            "delayed" => Some(Self::Delayed),
            _ => None,
        }
    }
}

impl std::fmt::Display for IntakeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntakeStatus::Taken => write!(f, "taken"),
            IntakeStatus::Missed => write!(f, "missed"),
            IntakeStatus::Delayed => write!(f, "delayed"),
        }
    }
}

/// A single logged dose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeRecord {
    /// When the dose was logged.
    pub ts: DateTime<Utc>,

    /// The prescription this dose belongs to.
    pub rx: String,

    /// Medicine name as recorded on the prescription.
    pub medicine: String,

    /// Outcome of the dose.
    pub status: IntakeStatus,
}

impl IntakeRecord {
    pub fn new(
        rx: impl Into<String>,
        medicine: impl Into<String>,
        status: IntakeStatus,
    ) -> Self {
        Self {
            ts: Utc::now(),
            rx: rx.into(),
            medicine: medicine.into(),
            status,
        }
    }
}

/// Append an intake record to the intake log.
pub fn append_intake(ctx: &StoreContext, record: &IntakeRecord) -> Result<()> {
    let intake_file = ctx.intake_file();

    let json_line = serde_json::to_string(record).map_err(|e| {
        ScripError::StoreError(format!("failed to serialize intake record: {}", e))
    })?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&intake_file)
        .map_err(|e| {
            ScripError::StoreError(format!(
                "failed to open intake log '{}': {}",
                intake_file.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        ScripError::StoreError(format!(
            "failed to write intake record to '{}': {}",
            intake_file.display(),
            e
        ))
    })?;

    Ok(())
}

/// Read all intake records from the log.
///
/// A missing log is an empty log. Unparseable lines are skipped; the
/// `audit` command reports them.
pub fn read_intakes(ctx: &StoreContext) -> Result<Vec<IntakeRecord>> {
    let intake_file = ctx.intake_file();
    if !intake_file.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&intake_file).map_err(|e| {
        ScripError::StoreError(format!(
            "failed to read intake log '{}': {}",
            intake_file.display(),
            e
        ))
    })?;

    Ok(content
        .lines()
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect())
}

/// Count unparseable lines in the intake log (for `audit`).
pub fn count_malformed_intake_lines(ctx: &StoreContext) -> Result<usize> {
    let intake_file = ctx.intake_file();
    if !intake_file.exists() {
        return Ok(0);
    }

    let content = fs::read_to_string(&intake_file).map_err(|e| {
        ScripError::StoreError(format!(
            "failed to read intake log '{}': {}",
            intake_file.display(),
            e
        ))
    })?;

    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| serde_json::from_str::<IntakeRecord>(line).is_err())
        .count())
}

/// Adherence tallies for one medicine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MedicineAdherence {
    pub taken: usize,
    pub missed: usize,
    pub delayed: usize,
}

impl MedicineAdherence {
    pub fn total(&self) -> usize {
        self.taken + self.missed + self.delayed
    }

    /// Percentage of doses taken, rounded to the nearest integer.
    /// No logged doses counts as zero.
    pub fn percentage(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            0
        } else {
            ((self.taken as f64 / total as f64) * 100.0).round() as u32
        }
    }
}

/// Adherence summary for one prescription.
#[derive(Debug, Clone, Default)]
pub struct AdherenceSummary {
    /// Per-medicine tallies, keyed by medicine name.
    pub medicines: BTreeMap<String, MedicineAdherence>,
}

impl AdherenceSummary {
    /// Fold intake records for one prescription into a summary.
    pub fn build(rx_id: &str, records: &[IntakeRecord]) -> Self {
        let mut summary = Self::default();

        for record in records.iter().filter(|r| r.rx == rx_id) {
            let entry = summary
                .medicines
                .entry(record.medicine.clone())
                .or_default();
            match record.status {
                IntakeStatus::Taken => entry.taken += 1,
                IntakeStatus::Missed => entry.missed += 1,
                IntakeStatus::Delayed => entry.delayed += 1,
            }
        }

        summary
    }

    /// Overall tallies across all medicines.
    pub fn overall(&self) -> MedicineAdherence {
        let mut overall = MedicineAdherence::default();
        for adherence in self.medicines.values() {
            overall.taken += adherence.taken;
            overall.missed += adherence.missed;
            overall.delayed += adherence.delayed;
        }
        overall
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_test_store;

    #[test]
    fn test_append_and_read_roundtrip() {
        let (_temp, ctx) = create_test_store();

        append_intake(
            &ctx,
            &IntakeRecord::new("RX-001", "Paracetamol", IntakeStatus::Taken),
        )
        .unwrap();
        append_intake(
            &ctx,
            &IntakeRecord::new("RX-001", "Paracetamol", IntakeStatus::Missed),
        )
        .unwrap();

        let records = read_intakes(&ctx).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status, IntakeStatus::Taken);
        assert_eq!(records[1].status, IntakeStatus::Missed);
    }

    #[test]
    fn test_missing_log_reads_empty() {
        let (_temp, ctx) = create_test_store();
        assert!(read_intakes(&ctx).unwrap().is_empty());
        assert_eq!(count_malformed_intake_lines(&ctx).unwrap(), 0);
    }

    #[test]
    fn test_malformed_lines_are_skipped_and_counted() {
        let (_temp, ctx) = create_test_store();
        append_intake(
            &ctx,
            &IntakeRecord::new("RX-001", "Aspirin", IntakeStatus::Taken),
        )
        .unwrap();
        let mut file = OpenOptions::new()
            .append(true)
            .open(ctx.intake_file())
            .unwrap();
        writeln!(file, "not json").unwrap();

        assert_eq!(read_intakes(&ctx).unwrap().len(), 1);
        assert_eq!(count_malformed_intake_lines(&ctx).unwrap(), 1);
    }

    #[test]
    fn test_adherence_summary() {
        let records = vec![
            IntakeRecord::new("RX-001", "Paracetamol", IntakeStatus::Taken),
            IntakeRecord::new("RX-001", "Paracetamol", IntakeStatus::Taken),
            IntakeRecord::new("RX-001", "Paracetamol", IntakeStatus::Missed),
            IntakeRecord::new("RX-001", "Paracetamol", IntakeStatus::Delayed),
            IntakeRecord::new("RX-001", "Amoxicillin", IntakeStatus::Taken),
            IntakeRecord::new("RX-002", "Aspirin", IntakeStatus::Missed),
        ];

        let summary = AdherenceSummary::build("RX-001", &records);

        assert_eq!(summary.medicines.len(), 2);
        let para = &summary.medicines["Paracetamol"];
        assert_eq!(para.taken, 2);
        assert_eq!(para.missed, 1);
        assert_eq!(para.delayed, 1);
        assert_eq!(para.percentage(), 50);

        let overall = summary.overall();
        assert_eq!(overall.total(), 5);
        assert_eq!(overall.percentage(), 60);
    }

    #[test]
    fn test_empty_adherence_is_zero() {
        let summary = AdherenceSummary::build("RX-009", &[]);
        assert!(summary.medicines.is_empty());
        assert_eq!(summary.overall().percentage(), 0);
    }

    #[test]
    fn test_intake_status_parsing() {
        assert_eq!(IntakeStatus::from_str("taken"), Some(IntakeStatus::Taken));
        assert_eq!(IntakeStatus::from_str("missed"), Some(IntakeStatus::Missed));
        assert_eq!(
            IntakeStatus::from_str("delayed"),
            Some(IntakeStatus::Delayed)
        );
        assert_eq!(IntakeStatus::from_str("skipped"), None);
    }
}
