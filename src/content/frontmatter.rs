//! Front-matter splitting

use anyhow::{anyhow, Result};
use serde_yaml::{Mapping, Value};

/// Raw, unvalidated front matter of one document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub fields: Mapping,
}

impl FrontMatter {
    /// Split front matter from the document body.
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start_matches('\u{feff}');

        let Some(rest) = content.strip_prefix("---") else {
            return Ok((FrontMatter::default(), content));
        };
        let rest = rest.trim_start_matches([' ', '\t']);
        let Some(rest) = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
        else {
            // `---something` on the first line is content, not a fence
            return Ok((FrontMatter::default(), content));
        };

        // Empty block: the closing fence follows immediately
        if let Some(remaining) = rest.strip_prefix("---") {
            return Ok((FrontMatter::default(), trim_fence_end(remaining)));
        }

        let Some(end_pos) = rest.find("\n---") else {
            // No closing ---, treat as no front-matter
            return Ok((FrontMatter::default(), content));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = trim_fence_end(&rest[end_pos + 4..]);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fields = match serde_yaml::from_str::<Value>(yaml_content)
            .map_err(|e| anyhow!("Failed to parse YAML front-matter: {}", e))?
        {
            Value::Mapping(map) => map,
            Value::Null => Mapping::new(),
            _ => return Err(anyhow!("Front-matter must be a mapping of fields")),
        };

        Ok((FrontMatter { fields }, remaining))
    }

    /// A top-level string field, if present
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

fn trim_fence_end(s: &str) -> &str {
    s.trim_start_matches(['-', ' ', '\t'])
        .trim_start_matches(['\n', '\r'])
}
