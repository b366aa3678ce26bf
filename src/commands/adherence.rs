//! Implementation of the `scrip adherence` command.
//!
//! Folds the dose intake log into per-medicine and overall compliance
//! percentages for one prescription.

use crate::cli::AdherenceArgs;
use crate::context::require_initialized_store;
use crate::error::Result;
use crate::intake::{AdherenceSummary, read_intakes};
use crate::rx::RxFile;

/// Execute the `scrip adherence` command.
pub fn cmd_adherence(args: AdherenceArgs) -> Result<()> {
    let ctx = require_initialized_store()?;

    let info = super::find_record(&ctx, &args.rx)?;
    let rx = RxFile::load(&info.path)?;

    let records = read_intakes(&ctx)?;
    let summary = AdherenceSummary::build(&info.id, &records);
    let overall = summary.overall();

    println!("Adherence report for {}:", info.id);
    println!();

    if overall.total() == 0 {
        println!("No doses logged yet.");
        println!();
        println!("Log doses with:");
        if let Some(medicine) = rx.frontmatter.medicines.first() {
            println!("  scrip dose {} \"{}\" --status taken", info.id, medicine.name);
        } else {
            println!("  scrip dose {} <medicine> --status taken", info.id);
        }
        return Ok(());
    }

    println!(
        "Overall: {}% ({} of {} doses taken)",
        overall.percentage(),
        overall.taken,
        overall.total()
    );
    println!();

    println!("Per medicine:");
    for (name, adherence) in &summary.medicines {
        println!(
            "  {}  {}%  (taken {}, missed {}, delayed {})",
            name,
            adherence.percentage(),
            adherence.taken,
            adherence.missed,
            adherence.delayed
        );
    }
    println!();

    // Insight thresholds match the safety-rating bands users already know.
    let percentage = overall.percentage();
    if percentage >= 80 {
        println!("Excellent adherence. Consistent medication helps faster recovery.");
    } else if percentage >= 60 {
        println!("Good progress, but consistency could improve. Consider dose reminders.");
    } else {
        println!(
            "Adherence needs improvement. Missing doses can affect treatment effectiveness;\n\
             please consult the prescribing doctor."
        );
    }

    Ok(())
}
