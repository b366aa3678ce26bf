//! CLI argument parsing for scrip.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};

/// Scrip: plain-file prescription safety validation and tracking.
///
/// Prescriptions are expressed as files inside a store directory:
/// - Folders are status buckets (DRAFT/ISSUED/DISPENSED)
/// - Record files carry patient, medicines, and validation results
/// - Every issue/verify transition runs the safety validation engine
#[derive(Parser, Debug)]
#[command(name = "scrip")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for scrip.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a scrip store in the current directory.
    ///
    /// Creates the `.scrip/` directory with status buckets, a default
    /// config, and the default safety rules.
    Init,

    /// Create a new DRAFT prescription.
    ///
    /// Writes a template record file in the DRAFT bucket for the doctor
    /// to fill in (medicines are added by editing the file).
    New(NewArgs),

    /// Run the safety validation engine against a record.
    ///
    /// Prints the detected issues and the safety score without changing
    /// any state. Exits with code 2 when critical issues are present.
    Validate(ValidateArgs),

    /// Issue a DRAFT prescription.
    ///
    /// Validates the record, persists issues and safety score into the
    /// frontmatter, and moves it to ISSUED. Refuses on critical issues
    /// unless --force is given.
    Issue(IssueArgs),

    /// Verify and dispense an ISSUED prescription.
    ///
    /// Re-validates the record, cross-checks the stored safety score,
    /// records the verifier, and moves the record to DISPENSED.
    Verify(VerifyArgs),

    /// Show details of a prescription record.
    ///
    /// Renders the record metadata, medicines, stored issues, and score.
    Show(ShowArgs),

    /// Show store status summary.
    ///
    /// Displays counts per bucket and flags low-scoring issued records.
    Status,

    /// Log a dose intake for a prescription medicine.
    Dose(DoseArgs),

    /// Show the adherence report for a prescription.
    ///
    /// Folds the dose intake log into per-medicine and overall
    /// compliance percentages.
    Adherence(AdherenceArgs),

    /// Rule table inspection commands.
    Rules(RulesCommand),

    /// Diagnose store health.
    ///
    /// Reports score drift, unknown drugs in issued records, orphan
    /// intake entries, stale drafts, and missing directories.
    Audit,
}

/// Arguments for the `new` command.
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Prescribing doctor's name.
    #[arg(long)]
    pub doctor: String,

    /// Hospital or clinic name.
    #[arg(long)]
    pub hospital: Option<String>,

    /// Patient identifier (chart number or phone).
    #[arg(long)]
    pub patient: Option<String>,

    /// Patient age in years.
    #[arg(long)]
    pub age: Option<u32>,

    /// Patient age group (child, adult, elderly). Derived from --age if omitted.
    #[arg(long)]
    pub age_group: Option<String>,

    /// Patient gender (male, female, other).
    #[arg(long)]
    pub gender: Option<String>,

    /// Patient allergies.
    #[arg(long, value_delimiter = ',')]
    pub allergies: Vec<String>,

    /// Recorded symptoms.
    #[arg(long)]
    pub symptoms: Option<String>,
}

/// Arguments for the `validate` command.
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Prescription ID (e.g., RX-001) or path to a record file.
    pub rx: String,

    /// Emit machine-readable JSON instead of the text report.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `issue` command.
#[derive(Parser, Debug)]
pub struct IssueArgs {
    /// Prescription ID to issue (e.g., RX-001).
    pub rx: String,

    /// Issue even when critical safety issues are present.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `verify` command.
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Prescription ID to verify (e.g., RX-001).
    pub rx: String,

    /// Verifier name recorded on the prescription (defaults to user@host).
    #[arg(long)]
    pub by: Option<String>,
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Prescription ID to show (e.g., RX-001).
    pub rx: String,
}

/// Arguments for the `dose` command.
#[derive(Parser, Debug)]
pub struct DoseArgs {
    /// Prescription ID the dose belongs to (e.g., RX-001).
    pub rx: String,

    /// Medicine name as recorded on the prescription.
    pub medicine: String,

    /// Dose outcome (taken, missed, delayed).
    #[arg(long, default_value = "taken")]
    pub status: String,
}

/// Arguments for the `adherence` command.
#[derive(Parser, Debug)]
pub struct AdherenceArgs {
    /// Prescription ID to report on (e.g., RX-001).
    pub rx: String,
}

/// Rules subcommands.
#[derive(Parser, Debug)]
pub struct RulesCommand {
    #[command(subcommand)]
    pub action: RulesAction,
}

/// Available rules actions.
#[derive(Subcommand, Debug)]
pub enum RulesAction {
    /// List all drugs in the active rule set.
    List,

    /// Show the full rule entry for one drug.
    Show(RulesShowArgs),
}

/// Arguments for the `rules show` command.
#[derive(Parser, Debug)]
pub struct RulesShowArgs {
    /// Drug name to show (case-insensitive).
    pub drug: String,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
