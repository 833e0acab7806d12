//! Project entry model

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Lifecycle state of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Complete,
    InProgress,
    Abandoned,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Complete, Status::InProgress, Status::Abandoned];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Complete => "complete",
            Status::InProgress => "in-progress",
            Status::Abandoned => "abandoned",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Effectiveness {
    High,
    Medium,
    Low,
}

impl Effectiveness {
    pub const ALL: [Effectiveness; 3] =
        [Effectiveness::High, Effectiveness::Medium, Effectiveness::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Effectiveness::High => "high",
            Effectiveness::Medium => "medium",
            Effectiveness::Low => "low",
        }
    }
}

/// A prompt worth keeping, with how well it worked
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptSnippet {
    pub prompt: String,
    pub context: Option<String>,
    pub effectiveness: Effectiveness,
    pub notes: Option<String>,
}

/// Token and spend totals; every field is independently optional
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostTracking {
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
    pub total_cost: Option<f64>,
    pub sessions: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonsLearned {
    pub what_worked: Vec<String>,
    pub what_didnt: Vec<String>,
    pub what_id_do_differently: Vec<String>,
}

/// One validated project write-up
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    /// Stable slug derived from the source path
    pub id: String,

    pub title: String,
    pub description: String,
    pub pub_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
    pub status: Status,
    pub difficulty: Difficulty,
    pub ambition_rating: u8,

    // Links
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub transcript_urls: Vec<String>,

    // Categorization
    pub tech_stack: Vec<String>,
    pub project_type: Option<String>,
    pub claude_techniques: Vec<String>,
    pub tags: Vec<String>,

    pub prompt_snippets: Vec<PromptSnippet>,
    pub cost_tracking: Option<CostTracking>,
    pub lessons_learned: Option<LessonsLearned>,

    // Display
    pub hero_image: Option<String>,
    pub featured: bool,
    pub draft: bool,
    pub reading_order: Option<i64>,
}

impl ProjectEntry {
    /// Site-relative link of the entry's page
    pub fn link(&self) -> String {
        format!("/projects/{}/", self.id)
    }
}
