//! Validate content without writing anything

use anyhow::Result;

use crate::techniques;
use crate::Journal;

/// Load and validate every document, then report counts
pub fn run(journal: &Journal) -> Result<()> {
    let collection = journal.load_collection()?;

    for entry in collection.all() {
        for id in &entry.claude_techniques {
            if techniques::lookup(id).is_none() {
                tracing::warn!("{}: unknown technique `{}`", entry.id, id);
            }
        }
    }

    println!(
        "{} projects valid ({} visible, {} drafts)",
        collection.all().len(),
        collection.visible_entries().len(),
        collection.draft_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_check_valid_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path()).unwrap();
        fs::create_dir_all(&journal.content_dir).unwrap();
        fs::write(
            journal.content_dir.join("ok.md"),
            "---\ntitle: Ok\ndescription: Fine\npubDate: 2024-01-01\nstatus: complete\ndifficulty: beginner\nambitionRating: 2\n---\n",
        )
        .unwrap();
        run(&journal).unwrap();

        fs::write(
            journal.content_dir.join("bad.md"),
            "---\ntitle: Bad\ndescription: Rating\npubDate: 2024-01-01\nstatus: complete\ndifficulty: beginner\nambitionRating: 9\n---\n",
        )
        .unwrap();
        let err = run(&journal).unwrap_err();
        assert!(format!("{:#}", err).contains("ambitionRating"));
    }
}
