//! Store context resolution for scrip.
//!
//! This module provides the "environment resolution" layer that locates the
//! record store (`.scrip/`) from any working directory. All scrip commands
//! use this module to find store state, so operations always target the
//! same store regardless of where the command is invoked from.
//!
//! Resolution order:
//! 1. The `SCRIP_STORE` environment variable, if set (must point at the
//!    store directory itself)
//! 2. Walking up from the current directory to the first ancestor
//!    containing a `.scrip/` directory

use crate::error::{Result, ScripError};
use std::env;
use std::path::{Path, PathBuf};

/// Default store directory name.
pub const DEFAULT_STORE_DIR: &str = ".scrip";

/// Environment variable overriding store resolution.
pub const STORE_ENV_VAR: &str = "SCRIP_STORE";

/// Status buckets a prescription record moves through, in lifecycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Draft,
    Issued,
    Dispensed,
}

impl Bucket {
    /// All buckets in lifecycle order.
    pub fn all() -> &'static [Bucket] {
        &[Bucket::Draft, Bucket::Issued, Bucket::Dispensed]
    }

    /// Directory name for this bucket.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Bucket::Draft => "DRAFT",
            Bucket::Issued => "ISSUED",
            Bucket::Dispensed => "DISPENSED",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

/// Resolved paths for the scrip record store.
///
/// All paths are absolute.
#[derive(Debug, Clone)]
pub struct StoreContext {
    /// Absolute path to the store directory (`.scrip/`).
    pub store_dir: PathBuf,
}

impl StoreContext {
    /// Resolve the store context from the environment and current directory.
    pub fn resolve() -> Result<Self> {
        if let Ok(store) = env::var(STORE_ENV_VAR) {
            return Ok(Self {
                store_dir: PathBuf::from(store),
            });
        }

        let cwd = env::current_dir().map_err(|e| {
            ScripError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Self::resolve_from(&cwd)
    }

    /// Resolve the store context by walking up from a specific directory.
    ///
    /// This is useful for testing or when the working directory is known.
    /// Falls back to `{start}/.scrip` when no ancestor carries a store, so
    /// `scrip init` can create one in place.
    pub fn resolve_from<P: AsRef<Path>>(start: P) -> Result<Self> {
        let start = start.as_ref();

        let mut current = Some(start);
        while let Some(dir) = current {
            let candidate = dir.join(DEFAULT_STORE_DIR);
            if candidate.is_dir() {
                return Ok(Self {
                    store_dir: candidate,
                });
            }
            current = dir.parent();
        }

        Ok(Self {
            store_dir: start.join(DEFAULT_STORE_DIR),
        })
    }

    /// Check if the store exists on disk.
    pub fn store_exists(&self) -> bool {
        self.store_dir.is_dir()
    }

    /// Ensure the store is initialized, returning an error if not.
    ///
    /// Called by all commands except `init` to provide a helpful error
    /// message guiding users to run `scrip init`.
    pub fn ensure_initialized(&self) -> Result<()> {
        if !self.store_exists() {
            return Err(ScripError::UserError(format!(
                "scrip store not initialized.\n\
                 Expected store directory at: {}\n\n\
                 Run `scrip init` to initialize a store here.",
                self.store_dir.display()
            )));
        }
        Ok(())
    }

    /// Get the path to a status bucket directory.
    pub fn bucket_path(&self, bucket: Bucket) -> PathBuf {
        self.store_dir.join(bucket.dir_name())
    }

    /// Get the path to the config file.
    pub fn config_path(&self) -> PathBuf {
        self.store_dir.join("config.yaml")
    }

    /// Get the path to the rules file.
    pub fn rules_path(&self) -> PathBuf {
        self.store_dir.join("rules.yaml")
    }

    /// Get the path to the events directory.
    pub fn events_dir(&self) -> PathBuf {
        self.store_dir.join("events")
    }

    /// Get the path to the main events log file.
    pub fn events_file(&self) -> PathBuf {
        self.events_dir().join("events.ndjson")
    }

    /// Get the path to the dose intake log file.
    pub fn intake_file(&self) -> PathBuf {
        self.store_dir.join("intake.ndjson")
    }
}

/// Convenience function to resolve context and ensure the store exists.
///
/// Use this in most commands (except `init`).
pub fn require_initialized_store() -> Result<StoreContext> {
    let ctx = StoreContext::resolve()?;
    ctx.ensure_initialized()?;
    Ok(ctx)
}
