//! Implementation of the `scrip new` command.
//!
//! Creates a DRAFT record with template frontmatter. Medicines are added by
//! editing the record file; `scrip issue` validates the result.

use crate::cli::NewArgs;
use crate::context::{Bucket, require_initialized_store};
use crate::error::{Result, ScripError};
use crate::events::{Event, EventAction, append_event};
use crate::rx::{AgeGroup, Gender, Patient, RxFile};
use crate::store::RxIndex;
use serde_json::json;

/// Execute the `scrip new` command.
pub fn cmd_new(args: NewArgs) -> Result<()> {
    let ctx = require_initialized_store()?;
    let config = super::load_config(&ctx);

    let age_group = match args.age_group.as_deref() {
        Some(s) => Some(AgeGroup::from_str(s).ok_or_else(|| {
            ScripError::UserError(format!(
                "invalid age group '{}'. Expected one of: child, adult, elderly.",
                s
            ))
        })?),
        None => None,
    };

    let gender = match args.gender.as_deref() {
        Some(s) => Gender::from_str(s).ok_or_else(|| {
            ScripError::UserError(format!(
                "invalid gender '{}'. Expected one of: male, female, other.",
                s
            ))
        })?,
        None => Gender::default(),
    };

    let index = RxIndex::build(&ctx)?;
    let rx_id = index.next_id();

    let mut rx = RxFile::new_draft(&rx_id, &args.doctor);
    rx.frontmatter.hospital = args.hospital;
    rx.frontmatter.patient = Patient {
        id: args.patient.unwrap_or_default(),
        age: args.age,
        age_group,
        gender,
        allergies: args
            .allergies
            .into_iter()
            .filter(|a| !a.trim().is_empty())
            .collect(),
        symptoms: args.symptoms.unwrap_or_default(),
    };

    let path = ctx.bucket_path(Bucket::Draft).join(format!("{}.md", rx_id));
    rx.save(&path)?;

    if config.log_events {
        let event = Event::new(EventAction::New)
            .with_rx(&rx_id)
            .with_details(json!({"doctor": rx.frontmatter.doctor}));
        append_event(&ctx, &event)?;
    }

    println!("Created draft prescription: {}", rx_id);
    println!("  Path: {}", path.display());
    println!();
    println!("Edit the file to add medicines, then run:");
    println!("  scrip validate {}", rx_id);
    println!("  scrip issue {}", rx_id);

    Ok(())
}
