//! `set` / `now` / `unset` commands - edit the persisted base time.
//!
//! A changed binding means any running engine must be reset; the commands
//! say so in their output.

use anyhow::{Context, Result};
use config_loader::ConfigStore;
use tracing::info;

use crate::cli::{EditArgs, SetArgs};

/// Execute the `set` command
pub fn run_set(args: &SetArgs) -> Result<()> {
    edit(&args.config, |store| {
        store
            .set_base_time_str(&args.base_time)
            .with_context(|| format!("Rejected base time '{}'", args.base_time))
    })
}

/// Execute the `now` command
pub fn run_now(args: &EditArgs) -> Result<()> {
    edit(&args.config, |store| Ok(store.set_base_time_now(chrono::Utc::now())))
}

/// Execute the `unset` command
pub fn run_unset(args: &EditArgs) -> Result<()> {
    edit(&args.config, |store| Ok(store.unset_base_time()))
}

fn edit<F>(path: &std::path::Path, apply: F) -> Result<()>
where
    F: FnOnce(&mut ConfigStore) -> Result<bool>,
{
    let mut store = ConfigStore::open_or_default(path)
        .with_context(|| format!("Failed to open config {}", path.display()))?;

    let changed = apply(&mut store)?;
    store
        .save()
        .with_context(|| format!("Failed to save config {}", path.display()))?;

    info!(
        path = %path.display(),
        base_time = %store.config().base_time,
        changed,
        "Base time saved"
    );

    println!("Base time: {}", store.config().base_time);
    if changed {
        println!("Binding changed - running sync engines must be reset.");
    }
    Ok(())
}
