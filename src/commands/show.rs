//! Implementation of the `scrip show` command.

use crate::cli::ShowArgs;
use crate::context::require_initialized_store;
use crate::engine::SafetyRating;
use crate::error::Result;
use crate::rx::RxFile;

/// Execute the `scrip show` command.
pub fn cmd_show(args: ShowArgs) -> Result<()> {
    let ctx = require_initialized_store()?;

    let info = super::find_record(&ctx, &args.rx)?;
    let rx = RxFile::load(&info.path)?;
    let fm = &rx.frontmatter;

    println!("{} [{}]", fm.id, info.bucket);
    println!("  Doctor:     {}", fm.doctor);
    if let Some(hospital) = &fm.hospital {
        println!("  Hospital:   {}", hospital);
    }
    if let Some(created) = fm.created {
        println!("  Created:    {}", created.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    if let Some(issued_at) = fm.issued_at {
        println!("  Issued:     {}", issued_at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    if let Some(dispensed_at) = fm.dispensed_at {
        println!(
            "  Dispensed:  {}",
            dispensed_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
    if let Some(verified_by) = &fm.verified_by {
        println!("  Verified:   {}", verified_by);
    }

    println!();
    println!("Patient:");
    if !fm.patient.id.is_empty() {
        println!("  ID:         {}", fm.patient.id);
    }
    if let Some(age) = fm.patient.age {
        println!("  Age:        {}", age);
    }
    if let Some(group) = fm.patient.effective_age_group() {
        println!("  Age group:  {}", group);
    }
    println!("  Gender:     {}", fm.patient.gender);
    if !fm.patient.allergies.is_empty() {
        println!("  Allergies:  {}", fm.patient.allergies.join(", "));
    }
    if !fm.patient.symptoms.is_empty() {
        println!("  Symptoms:   {}", fm.patient.symptoms);
    }

    println!();
    if fm.medicines.is_empty() {
        println!("No medicines recorded.");
    } else {
        println!("Medicines ({}):", fm.medicines.len());
        for medicine in &fm.medicines {
            let mut line = format!("  - {}", medicine.name);
            if !medicine.dosage.is_empty() {
                line.push_str(&format!("  {}", medicine.dosage));
            }
            if !medicine.frequency.is_empty() {
                line.push_str(&format!("  {}", medicine.frequency));
            }
            if !medicine.duration.is_empty() {
                line.push_str(&format!("  ({})", medicine.duration));
            }
            println!("{}", line);
            if let Some(instructions) = &medicine.instructions {
                println!("    {}", instructions);
            }
        }
    }

    if !fm.issues.is_empty() {
        println!();
        println!("Recorded safety issues ({}):", fm.issues.len());
        for issue in &fm.issues {
            println!("  [{}] {} - {}", issue.severity, issue.kind, issue.message);
        }
    }

    if let Some(score) = fm.safety_score {
        println!();
        println!(
            "Safety score: {}/100 ({})",
            score,
            SafetyRating::from_score(score)
        );
    }

    let body = rx.body.trim();
    if !body.is_empty() {
        println!();
        println!("{}", body);
    }

    Ok(())
}
