//! Technique registry
//!
//! Static table of the AI-assisted development practices that project
//! entries reference by id in `claudeTechniques`. Ids are matched exactly
//! (case-sensitive); an unknown id renders as itself.

use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;

/// A named development practice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Technique {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

const TECHNIQUES: &[Technique] = &[
    Technique {
        id: "plan-mode",
        label: "Plan Mode",
        description: "Using Claude's plan mode to design implementation before coding",
    },
    Technique {
        id: "subagents",
        label: "Subagents",
        description: "Delegating subtasks to specialized subagents",
    },
    Technique {
        id: "memory-files",
        label: "Memory Files",
        description: "Using CLAUDE.md and memory files for persistent context",
    },
    Technique {
        id: "hooks",
        label: "Hooks",
        description: "Shell commands that execute in response to Claude events",
    },
    Technique {
        id: "iterative-refinement",
        label: "Iterative Refinement",
        description: "Multiple rounds of feedback to improve output quality",
    },
    Technique {
        id: "test-driven",
        label: "Test-Driven",
        description: "Writing tests first, then implementing with Claude",
    },
    Technique {
        id: "code-review",
        label: "Code Review",
        description: "Using Claude to review and improve existing code",
    },
    Technique {
        id: "scaffold-then-fill",
        label: "Scaffold Then Fill",
        description: "Having Claude create structure first, then fill in details",
    },
    Technique {
        id: "context-priming",
        label: "Context Priming",
        description: "Providing extensive context before making requests",
    },
    Technique {
        id: "constraint-prompting",
        label: "Constraint Prompting",
        description: "Setting explicit constraints and boundaries for output",
    },
    Technique {
        id: "decomposition",
        label: "Decomposition",
        description: "Breaking complex tasks into smaller, manageable pieces",
    },
    Technique {
        id: "example-driven",
        label: "Example-Driven",
        description: "Providing examples of desired output format and style",
    },
];

lazy_static! {
    static ref BY_ID: HashMap<&'static str, &'static Technique> =
        TECHNIQUES.iter().map(|t| (t.id, t)).collect();
}

/// All techniques in table order
pub fn all() -> &'static [Technique] {
    TECHNIQUES
}

/// Find a technique by its exact id
pub fn lookup(id: &str) -> Option<&'static Technique> {
    BY_ID.get(id).copied()
}

/// Display label for an id, or the id itself when it is not registered
pub fn label_of(id: &str) -> &str {
    match lookup(id) {
        Some(technique) => technique.label,
        None => id,
    }
}
