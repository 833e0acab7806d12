//! Search index (search.json)

use serde::Serialize;

use crate::content::{Collection, Difficulty, ProjectEntry, Status};
use crate::helpers::iso_timestamp;

/// One flat, client-side searchable record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub status: Status,
    pub difficulty: Difficulty,
    pub tech_stack: &'a [String],
    pub tags: &'a [String],
    /// Raw technique ids; labels are resolved by whoever displays them
    pub claude_techniques: &'a [String],
    pub pub_date: String,
}

impl<'a> From<&'a ProjectEntry> for SearchRecord<'a> {
    fn from(entry: &'a ProjectEntry) -> Self {
        Self {
            id: &entry.id,
            title: &entry.title,
            description: &entry.description,
            status: entry.status,
            difficulty: entry.difficulty,
            tech_stack: &entry.tech_stack,
            tags: &entry.tags,
            claude_techniques: &entry.claude_techniques,
            pub_date: iso_timestamp(&entry.pub_date),
        }
    }
}

/// One record per visible entry, in collection order
pub fn build_index(collection: &Collection) -> Vec<SearchRecord<'_>> {
    collection
        .visible_entries()
        .into_iter()
        .map(SearchRecord::from)
        .collect()
}

/// Serialize the index as a JSON array
pub fn render(collection: &Collection) -> serde_json::Result<String> {
    serde_json::to_string(&build_index(collection))
}
