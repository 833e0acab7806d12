//! The validated project collection and the views generators read from it

use std::collections::{BTreeMap, HashSet};

use super::loader::RawDocument;
use super::schema;
use super::ProjectEntry;
use crate::error::SchemaValidationError;

/// Every validated entry, drafts included, in load order.
///
/// Generators only ever see the non-draft views.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    entries: Vec<ProjectEntry>,
}

impl Collection {
    /// Validate raw documents into a collection.
    ///
    /// Stops at the first invalid document; no partial collection is returned.
    pub fn from_documents(documents: &[RawDocument]) -> Result<Self, SchemaValidationError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(documents.len());

        for doc in documents {
            if !seen.insert(doc.id.as_str()) {
                return Err(SchemaValidationError::new(
                    &doc.id,
                    "id",
                    format!("is used by more than one document ({:?})", doc.source),
                ));
            }
            let entry = schema::validate(&doc.id, &doc.front_matter.fields)?;
            tracing::debug!("Validated {}", entry.id);
            entries.push(entry);
        }

        Ok(Self { entries })
    }

    /// Build a collection from entries that are already validated
    pub fn from_entries(entries: Vec<ProjectEntry>) -> Self {
        Self { entries }
    }

    /// All entries including drafts
    pub fn all(&self) -> &[ProjectEntry] {
        &self.entries
    }

    /// Number of draft entries
    pub fn draft_count(&self) -> usize {
        self.entries.iter().filter(|e| e.draft).count()
    }

    fn visible(&self) -> impl Iterator<Item = &ProjectEntry> {
        self.entries.iter().filter(|e| !e.draft)
    }

    /// Entries with `draft = false`, in load order
    pub fn visible_entries(&self) -> Vec<&ProjectEntry> {
        self.visible().collect()
    }

    /// A visible entry by id
    pub fn get(&self, id: &str) -> Option<&ProjectEntry> {
        self.visible().find(|e| e.id == id)
    }

    /// Visible entries, newest `pubDate` first; equal dates order by id
    pub fn newest_first(&self) -> Vec<&ProjectEntry> {
        let mut entries = self.visible_entries();
        entries.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then_with(|| a.id.cmp(&b.id)));
        entries
    }

    /// Visible featured entries by `readingOrder` (unset last), then newest first
    pub fn featured(&self) -> Vec<&ProjectEntry> {
        let mut entries: Vec<_> = self.visible().filter(|e| e.featured).collect();
        entries.sort_by(|a, b| {
            let order = match (a.reading_order, b.reading_order) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            };
            order
                .then_with(|| b.pub_date.cmp(&a.pub_date))
                .then_with(|| a.id.cmp(&b.id))
        });
        entries
    }

    /// How many visible entries carry each tag
    pub fn tag_counts(&self) -> BTreeMap<&str, usize> {
        count(self.visible().flat_map(|e| &e.tags))
    }

    /// How many visible entries use each tech stack item
    pub fn tech_counts(&self) -> BTreeMap<&str, usize> {
        count(self.visible().flat_map(|e| &e.tech_stack))
    }
}

fn count<'a>(items: impl Iterator<Item = &'a String>) -> BTreeMap<&'a str, usize> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item.as_str()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;
    use crate::test_helpers::{draft, entry};
    use std::path::PathBuf;

    fn document(id: &str, yaml: &str) -> RawDocument {
        let content = format!("---\n{}\n---\n", yaml);
        let (front_matter, _) = FrontMatter::parse(&content).unwrap();
        RawDocument {
            id: id.to_string(),
            source: PathBuf::from(format!("{}.md", id)),
            front_matter,
            body: String::new(),
        }
    }

    const VALID: &str = "title: T\ndescription: D\npubDate: 2024-01-01\nstatus: abandoned\ndifficulty: advanced\nambitionRating: 5";

    #[test]
    fn test_from_documents() {
        let docs = vec![document("a", VALID), document("b", &format!("{}\ndraft: true", VALID))];
        let collection = Collection::from_documents(&docs).unwrap();
        assert_eq!(collection.all().len(), 2);
        assert_eq!(collection.draft_count(), 1);
        let visible: Vec<_> = collection.visible_entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(visible, vec!["a"]);
    }

    #[test]
    fn test_invalid_document_aborts() {
        let docs = vec![
            document("good", VALID),
            document("bad", "title: only a title"),
            document("later", VALID),
        ];
        let err = Collection::from_documents(&docs).unwrap_err();
        assert_eq!(err.id, "bad");
        assert_eq!(err.field, "description");
    }

    #[test]
    fn test_duplicate_ids() {
        let docs = vec![document("a", VALID), document("a", VALID)];
        let err = Collection::from_documents(&docs).unwrap_err();
        assert_eq!(err.field, "id");
    }

    #[test]
    fn test_drafts_hidden_from_views() {
        let collection = Collection::from_entries(vec![
            entry("a", "2024-01-01"),
            draft("b", "2024-02-01"),
            entry("c", "2024-03-01"),
        ]);
        assert_eq!(collection.visible_entries().len(), 2);
        assert!(collection.get("b").is_none());
        assert!(collection.get("c").is_some());
        assert!(collection.newest_first().iter().all(|e| !e.draft));
    }

    #[test]
    fn test_newest_first_tie_break() {
        let collection = Collection::from_entries(vec![
            entry("zeta", "2024-01-01"),
            entry("alpha", "2024-01-01"),
            entry("new", "2024-06-01"),
        ]);
        let ids: Vec<_> = collection.newest_first().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "alpha", "zeta"]);
    }

    #[test]
    fn test_featured_order() {
        let mut first = entry("first", "2024-01-01");
        first.featured = true;
        first.reading_order = Some(1);
        let mut unordered = entry("unordered", "2024-09-01");
        unordered.featured = true;
        let mut second = entry("second", "2024-05-01");
        second.featured = true;
        second.reading_order = Some(2);
        let plain = entry("plain", "2024-02-01");

        let collection = Collection::from_entries(vec![unordered, plain, second, first]);
        let ids: Vec<_> = collection.featured().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "unordered"]);
    }

    #[test]
    fn test_counts() {
        let mut a = entry("a", "2024-01-01");
        a.tags = vec!["cli".to_string(), "rust".to_string()];
        a.tech_stack = vec!["Rust".to_string()];
        let mut b = entry("b", "2024-01-02");
        b.tags = vec!["rust".to_string()];
        let mut hidden = draft("c", "2024-01-03");
        hidden.tags = vec!["secret".to_string()];

        let collection = Collection::from_entries(vec![a, b, hidden]);
        let tags = collection.tag_counts();
        assert_eq!(tags.get("rust"), Some(&2));
        assert_eq!(tags.get("cli"), Some(&1));
        assert!(!tags.contains_key("secret"));
        assert_eq!(collection.tech_counts().get("Rust"), Some(&1));
    }
}
