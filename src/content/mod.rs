//! Content module - loads project documents, validates them against the
//! project schema and exposes the resulting collection

mod collection;
mod entry;
mod frontmatter;
pub mod loader;
pub mod schema;

pub use collection::Collection;
pub use entry::{
    CostTracking, Difficulty, Effectiveness, LessonsLearned, ProjectEntry, PromptSnippet, Status,
};
pub use frontmatter::FrontMatter;
pub use loader::{ContentLoader, RawDocument};
