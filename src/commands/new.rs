//! Scaffold a new project entry

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::PathBuf;

use crate::Journal;

/// Create `<content_dir>/<slug>.md` as a draft with every required field filled in
pub fn create_project(journal: &Journal, title: &str) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    fs::create_dir_all(&journal.content_dir)
        .with_context(|| format!("Failed to create {:?}", journal.content_dir))?;

    let file_path = journal.content_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, scaffold(title)?)
        .with_context(|| format!("Failed to write {:?}", file_path))?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}

fn scaffold(title: &str) -> Result<String> {
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();

    let mut fields = Mapping::new();
    let mut set = |key: &str, value: Value| {
        fields.insert(Value::from(key), value);
    };
    set("title", Value::from(title));
    set("description", Value::from("One-sentence summary of the project."));
    set("pubDate", Value::from(today));
    set("status", Value::from("in-progress"));
    set("difficulty", Value::from("intermediate"));
    set("ambitionRating", Value::from(3));
    set("techStack", Value::Sequence(Vec::new()));
    set("claudeTechniques", Value::Sequence(Vec::new()));
    set("tags", Value::Sequence(Vec::new()));
    set("draft", Value::from(true));

    let yaml = serde_yaml::to_string(&fields).context("Failed to serialize front matter")?;
    Ok(format!("---\n{}---\n\n## What I built\n\n## How it went\n", yaml))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Status;

    #[test]
    fn test_scaffold_is_a_valid_draft() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path()).unwrap();

        let path = create_project(&journal, "Tetris: in Rust!").unwrap();
        assert_eq!(path, journal.content_dir.join("tetris-in-rust.md"));

        let collection = journal.load_collection().unwrap();
        let entry = &collection.all()[0];
        assert_eq!(entry.id, "tetris-in-rust");
        assert_eq!(entry.title, "Tetris: in Rust!");
        assert_eq!(entry.status, Status::InProgress);
        assert!(entry.draft);
        assert!(collection.visible_entries().is_empty());
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path()).unwrap();
        create_project(&journal, "Snake").unwrap();
        let err = create_project(&journal, "snake").unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_rejects_unsluggable_title() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path()).unwrap();
        assert!(create_project(&journal, "!!!").is_err());
    }
}
