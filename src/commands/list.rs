//! List journal content

use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::content::{Collection, ProjectEntry};
use crate::techniques;
use crate::Journal;

/// List journal content by type
pub fn run(journal: &Journal, content_type: &str) -> Result<()> {
    let output = match content_type {
        // the registry needs no content on disk
        "technique" | "techniques" => list_techniques(),
        _ => render(&journal.load_collection()?, content_type)?,
    };
    print!("{}", output);
    Ok(())
}

/// Format one listing of the collection
pub fn render(collection: &Collection, content_type: &str) -> Result<String> {
    let output = match content_type {
        "project" | "projects" => list_entries("Projects", &collection.newest_first()),
        "draft" | "drafts" => {
            let drafts: Vec<_> = collection.all().iter().filter(|e| e.draft).collect();
            list_entries("Drafts", &drafts)
        }
        "featured" => list_entries("Featured", &collection.featured()),
        "tag" | "tags" => list_counts("Tags", collection.tag_counts()),
        "tech" => list_counts("Tech", collection.tech_counts()),
        "technique" | "techniques" => list_techniques(),
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: projects, drafts, featured, tags, tech, techniques",
                content_type
            );
        }
    };
    Ok(output)
}

fn list_entries(heading: &str, entries: &[&ProjectEntry]) -> String {
    let mut out = format!("{} ({}):\n", heading, entries.len());
    for entry in entries {
        let _ = writeln!(
            out,
            "  {} - {} [{}] ({})",
            entry.pub_date.format("%Y-%m-%d"),
            entry.title,
            entry.id,
            entry.status.as_str()
        );
        if !entry.claude_techniques.is_empty() {
            let labels: Vec<_> = entry
                .claude_techniques
                .iter()
                .map(|id| techniques::label_of(id))
                .collect();
            let _ = writeln!(out, "      techniques: {}", labels.join(", "));
        }
    }
    out
}

fn list_counts(heading: &str, counts: BTreeMap<&str, usize>) -> String {
    let mut counts: Vec<_> = counts.into_iter().collect();
    // most used first, then alphabetical
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut out = format!("{} ({}):\n", heading, counts.len());
    for (name, count) in counts {
        let _ = writeln!(out, "  {} ({})", name, count);
    }
    out
}

fn list_techniques() -> String {
    let all = techniques::all();
    let mut out = format!("Techniques ({}):\n", all.len());
    for technique in all {
        let _ = writeln!(
            out,
            "  {} - {}: {}",
            technique.id, technique.label, technique.description
        );
    }
    out
}
