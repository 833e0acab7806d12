//! Shared test fixtures.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let collection = Collection::from_entries(vec![
//!     entry("tetris", "2024-01-01"),
//!     draft("secret", "2024-02-01"),
//! ]);
//! ```

use crate::content::{Difficulty, ProjectEntry, Status};
use crate::helpers::parse_date_string;

/// A valid, visible entry with only the required fields set
pub fn entry(id: &str, pub_date: &str) -> ProjectEntry {
    ProjectEntry {
        id: id.to_string(),
        title: format!("Project {}", id),
        description: format!("About {}", id),
        pub_date: parse_date_string(pub_date).unwrap(),
        updated_date: None,
        status: Status::Complete,
        difficulty: Difficulty::Beginner,
        ambition_rating: 3,
        repo_url: None,
        live_url: None,
        transcript_urls: Vec::new(),
        tech_stack: Vec::new(),
        project_type: None,
        claude_techniques: Vec::new(),
        tags: Vec::new(),
        prompt_snippets: Vec::new(),
        cost_tracking: None,
        lessons_learned: None,
        hero_image: None,
        featured: false,
        draft: false,
        reading_order: None,
    }
}

/// Same as [`entry`] but flagged as a draft
pub fn draft(id: &str, pub_date: &str) -> ProjectEntry {
    ProjectEntry {
        draft: true,
        ..entry(id, pub_date)
    }
}

/// Strings of `n` characters
pub fn chars(n: usize) -> String {
    "abcdefghij".chars().cycle().take(n).collect()
}
