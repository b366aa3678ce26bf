//! Implementation of the `scrip dose` command.

use crate::cli::DoseArgs;
use crate::context::{Bucket, require_initialized_store};
use crate::error::{Result, ScripError};
use crate::events::{Event, EventAction, append_event};
use crate::intake::{IntakeRecord, IntakeStatus, append_intake};
use crate::rx::RxFile;
use serde_json::json;

/// Execute the `scrip dose` command.
pub fn cmd_dose(args: DoseArgs) -> Result<()> {
    let ctx = require_initialized_store()?;
    let config = super::load_config(&ctx);

    let status = IntakeStatus::from_str(&args.status).ok_or_else(|| {
        ScripError::UserError(format!(
            "invalid dose status '{}'. Expected one of: taken, missed, delayed.",
            args.status
        ))
    })?;

    let info = super::find_record(&ctx, &args.rx)?;
    if info.bucket == Bucket::Draft {
        return Err(ScripError::UserError(format!(
            "prescription '{}' is still a draft; doses can only be logged for issued records.",
            info.id
        )));
    }

    let rx = RxFile::load(&info.path)?;

    // Record doses under the canonical medicine name from the prescription.
    let medicine = rx
        .frontmatter
        .medicines
        .iter()
        .find(|m| m.name.eq_ignore_ascii_case(args.medicine.trim()))
        .ok_or_else(|| {
            let names: Vec<&str> = rx
                .frontmatter
                .medicines
                .iter()
                .map(|m| m.name.as_str())
                .collect();
            ScripError::UserError(format!(
                "'{}' is not on prescription '{}'.\n\
                 Recorded medicines: {}",
                args.medicine,
                info.id,
                names.join(", ")
            ))
        })?;

    let record = IntakeRecord::new(&info.id, &medicine.name, status);
    append_intake(&ctx, &record)?;

    if config.log_events {
        let event = Event::new(EventAction::Dose)
            .with_rx(&info.id)
            .with_details(json!({
                "medicine": medicine.name,
                "status": status.to_string()
            }));
        append_event(&ctx, &event)?;
    }

    println!("Logged {} dose of {} for {}.", status, medicine.name, info.id);

    Ok(())
}
