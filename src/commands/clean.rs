//! Clean the public directory

use anyhow::{Context, Result};
use std::fs;

use crate::Journal;

/// Remove every generated artifact
pub fn run(journal: &Journal) -> Result<()> {
    if journal.public_dir.exists() {
        fs::remove_dir_all(&journal.public_dir)
            .with_context(|| format!("Failed to delete {:?}", journal.public_dir))?;
        tracing::info!("Deleted: {:?}", journal.public_dir);
    }

    Ok(())
}
