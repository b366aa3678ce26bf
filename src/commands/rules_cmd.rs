//! Implementation of the `scrip rules` commands.
//!
//! Inspection of the active rule set: `rules list` summarizes every drug,
//! `rules show <drug>` prints one drug's full entry.

use crate::cli::RulesShowArgs;
use crate::context::require_initialized_store;
use crate::error::{Result, ScripError};

/// Execute the `scrip rules list` command.
pub fn cmd_rules_list() -> Result<()> {
    let ctx = require_initialized_store()?;
    let config = super::load_config(&ctx);
    let rules = config.load_rules(&ctx)?;

    println!("Active rules ({} drugs):", rules.drugs.len());
    println!();

    for (name, rule) in &rules.drugs {
        let mut notes = Vec::new();
        if let Some(min_age) = rule.min_age {
            notes.push(format!("min age {}", min_age));
        }
        if let Some(max_age) = rule.max_age {
            notes.push(format!("max age {}", max_age));
        }
        if !rule.restricted_groups.is_empty() {
            let groups: Vec<String> = rule
                .restricted_groups
                .iter()
                .map(|g| g.to_string())
                .collect();
            notes.push(format!("restricted: {}", groups.join(", ")));
        }
        if !rule.contraindicated_genders.is_empty() {
            let genders: Vec<String> = rule
                .contraindicated_genders
                .iter()
                .map(|g| g.to_string())
                .collect();
            notes.push(format!("contraindicated: {}", genders.join(", ")));
        }
        if !rule.interacts_with.is_empty() {
            notes.push(format!("{} interaction(s)", rule.interacts_with.len()));
        }
        if let Some(max_dose) = rule.max_dose_mg {
            notes.push(format!("max dose {}mg", max_dose));
        }

        if notes.is_empty() {
            println!("  {}", name);
        } else {
            println!("  {}  ({})", name, notes.join("; "));
        }
    }

    println!();
    println!(
        "Checks: gender={}, mismatch={}; deductions: critical -{}, high -{}, medium -{}, low -{}",
        rules.check_gender,
        rules.check_mismatch,
        rules.deductions.critical,
        rules.deductions.high,
        rules.deductions.medium,
        rules.deductions.low
    );

    Ok(())
}

/// Execute the `scrip rules show` command.
pub fn cmd_rules_show(args: RulesShowArgs) -> Result<()> {
    let ctx = require_initialized_store()?;
    let config = super::load_config(&ctx);
    let rules = config.load_rules(&ctx)?;

    let key = args.drug.trim().to_lowercase();
    let rule = rules.drugs.get(&key).ok_or_else(|| {
        ScripError::UserError(format!(
            "no rules for drug '{}'.\n\
             Run `scrip rules list` to see known drugs.",
            args.drug
        ))
    })?;

    println!("{}:", key);
    if let Some(min_age) = rule.min_age {
        println!("  Min age:        {}", min_age);
    }
    if let Some(max_age) = rule.max_age {
        println!("  Max age:        {}", max_age);
    }
    if !rule.restricted_groups.is_empty() {
        let groups: Vec<String> = rule
            .restricted_groups
            .iter()
            .map(|g| g.to_string())
            .collect();
        println!("  Restricted:     {}", groups.join(", "));
    }
    if !rule.contraindicated_genders.is_empty() {
        let genders: Vec<String> = rule
            .contraindicated_genders
            .iter()
            .map(|g| g.to_string())
            .collect();
        println!("  Contraindicated: {}", genders.join(", "));
    }
    if !rule.interacts_with.is_empty() {
        println!("  Interacts with: {}", rule.interacts_with.join(", "));
    }
    if !rule.standard_dosages.is_empty() {
        println!("  Std dosages:    {}", rule.standard_dosages.join(", "));
    }
    if let Some(max_dose) = rule.max_dose_mg {
        println!("  Max dose:       {}mg", max_dose);
    }
    if !rule.allergy_terms.is_empty() {
        println!("  Allergy terms:  {}", rule.allergy_terms.join(", "));
    }

    Ok(())
}
