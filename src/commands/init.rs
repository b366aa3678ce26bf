//! Implementation of the `scrip init` command.
//!
//! Creates the store skeleton: bucket directories, the events directory,
//! a default `config.yaml`, and the default safety rules in `rules.yaml`.

use crate::config::Config;
use crate::context::{Bucket, StoreContext};
use crate::error::{Result, ScripError};
use crate::events::{Event, EventAction, append_event};
use crate::fs::atomic_write_file;
use crate::rules::RuleSet;
use serde_json::json;

/// Execute the `scrip init` command.
pub fn cmd_init() -> Result<()> {
    let ctx = StoreContext::resolve()?;

    if ctx.store_exists() {
        return Err(ScripError::UserError(format!(
            "scrip store already initialized at: {}",
            ctx.store_dir.display()
        )));
    }

    init_store(&ctx)?;

    let event = Event::new(EventAction::Init)
        .with_details(json!({"store": ctx.store_dir.display().to_string()}));
    append_event(&ctx, &event)?;

    println!("Initialized scrip store at: {}", ctx.store_dir.display());
    println!();
    println!("Buckets:");
    for &bucket in Bucket::all() {
        println!("  {}", ctx.bucket_path(bucket).display());
    }
    println!();
    println!("Next steps:");
    println!("  scrip new --doctor \"Dr. Name\"    # create a draft prescription");
    println!("  scrip rules list                  # inspect the safety rules");

    Ok(())
}

/// Create store directories and default configuration files.
pub(crate) fn init_store(ctx: &StoreContext) -> Result<()> {
    for &bucket in Bucket::all() {
        let path = ctx.bucket_path(bucket);
        std::fs::create_dir_all(&path).map_err(|e| {
            ScripError::StoreError(format!(
                "failed to create bucket directory '{}': {}",
                path.display(),
                e
            ))
        })?;
    }

    let events_dir = ctx.events_dir();
    std::fs::create_dir_all(&events_dir).map_err(|e| {
        ScripError::StoreError(format!(
            "failed to create events directory '{}': {}",
            events_dir.display(),
            e
        ))
    })?;

    atomic_write_file(ctx.config_path(), &Config::default().to_yaml()?)?;
    atomic_write_file(ctx.rules_path(), &RuleSet::default().to_yaml()?)?;

    Ok(())
}
