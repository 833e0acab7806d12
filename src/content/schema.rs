//! Project entry schema
//!
//! Turns the raw front-matter record of one document into a validated
//! [`ProjectEntry`]. Validation is all-or-nothing: the first violated
//! constraint is reported with the entry id and the field path.
//!
//! Conventions:
//! - array fields default to empty when absent
//! - optional scalars stay `None` when absent (a YAML `null` counts as absent)
//! - date strings are coerced into UTC timestamps; unparseable dates are errors
//! - unknown keys are ignored

use chrono::{DateTime, Utc};
use serde_yaml::{Mapping, Value};

use super::entry::{
    CostTracking, Difficulty, Effectiveness, LessonsLearned, ProjectEntry, PromptSnippet, Status,
};
use crate::error::SchemaValidationError;
use crate::helpers::parse_date_string;

type Result<T> = std::result::Result<T, SchemaValidationError>;

/// Validate one raw front-matter record
pub fn validate(id: &str, front_matter: &Mapping) -> Result<ProjectEntry> {
    let fields = Fields::root(id, front_matter);

    let title = fields.non_empty_text("title")?;
    let description = fields.non_empty_text("description")?;
    let pub_date = fields
        .date("pubDate")?
        .ok_or_else(|| fields.error("pubDate", "is required"))?;
    let updated_date = fields.date("updatedDate")?;
    let status = fields.one_of("status", &Status::ALL, Status::as_str)?;
    let difficulty = fields.one_of("difficulty", &Difficulty::ALL, Difficulty::as_str)?;

    let ambition_rating = fields
        .integer("ambitionRating")?
        .ok_or_else(|| fields.error("ambitionRating", "is required"))?;
    let ambition_rating = u8::try_from(ambition_rating)
        .ok()
        .filter(|r| (1..=5).contains(r))
        .ok_or_else(|| {
            fields.error(
                "ambitionRating",
                format!("must be between 1 and 5, found {}", ambition_rating),
            )
        })?;

    let prompt_snippets = fields
        .records("promptSnippets")?
        .iter()
        .map(|snippet| {
            Ok(PromptSnippet {
                prompt: snippet.text("prompt")?,
                context: snippet.optional_text("context")?,
                effectiveness: snippet.one_of(
                    "effectiveness",
                    &Effectiveness::ALL,
                    Effectiveness::as_str,
                )?,
                notes: snippet.optional_text("notes")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let cost_tracking = match fields.record("costTracking")? {
        Some(cost) => Some(CostTracking {
            input_tokens: cost.count("inputTokens")?,
            output_tokens: cost.count("outputTokens")?,
            total_cost: cost.number("totalCost")?,
            sessions: cost
                .count("sessions")?
                .map(|n| {
                    u32::try_from(n).map_err(|_| cost.error("sessions", "is out of range"))
                })
                .transpose()?,
        }),
        None => None,
    };

    let lessons_learned = match fields.record("lessonsLearned")? {
        Some(lessons) => Some(LessonsLearned {
            what_worked: lessons.text_list("whatWorked")?,
            what_didnt: lessons.text_list("whatDidnt")?,
            what_id_do_differently: lessons.text_list("whatIdDoDifferently")?,
        }),
        None => None,
    };

    Ok(ProjectEntry {
        id: id.to_string(),
        title,
        description,
        pub_date,
        updated_date,
        status,
        difficulty,
        ambition_rating,
        repo_url: fields.url("repoUrl")?,
        live_url: fields.url("liveUrl")?,
        transcript_urls: fields.url_list("transcriptUrls")?,
        tech_stack: fields.text_list("techStack")?,
        project_type: fields.optional_text("projectType")?,
        claude_techniques: fields.text_list("claudeTechniques")?,
        tags: fields.text_list("tags")?,
        prompt_snippets,
        cost_tracking,
        lessons_learned,
        hero_image: fields.optional_text("heroImage")?,
        featured: fields.flag("featured")?,
        draft: fields.flag("draft")?,
        reading_order: fields.integer("readingOrder")?,
    })
}

/// Typed reads over one YAML mapping, with field paths for error reporting
struct Fields<'a> {
    id: &'a str,
    prefix: String,
    map: &'a Mapping,
}

impl<'a> Fields<'a> {
    fn root(id: &'a str, map: &'a Mapping) -> Self {
        Self {
            id,
            prefix: String::new(),
            map,
        }
    }

    fn path(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    fn error(&self, key: &str, reason: impl Into<String>) -> SchemaValidationError {
        SchemaValidationError::new(self.id, self.path(key), reason)
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    fn mismatch(&self, key: &str, expected: &str, found: &Value) -> SchemaValidationError {
        self.error(
            key,
            format!("expected {}, found {}", expected, kind_of(found)),
        )
    }

    fn optional_text(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.mismatch(key, "string", other)),
        }
    }

    fn text(&self, key: &str) -> Result<String> {
        self.optional_text(key)?
            .ok_or_else(|| self.error(key, "is required"))
    }

    fn non_empty_text(&self, key: &str) -> Result<String> {
        let value = self.text(key)?;
        if value.trim().is_empty() {
            return Err(self.error(key, "must not be empty"));
        }
        Ok(value)
    }

    fn sequence(&self, key: &str) -> Result<&'a [Value]> {
        match self.get(key) {
            None => Ok(&[]),
            Some(Value::Sequence(items)) => Ok(items.as_slice()),
            Some(other) => Err(self.mismatch(key, "array", other)),
        }
    }

    fn text_list(&self, key: &str) -> Result<Vec<String>> {
        self.sequence(key)?
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(self.mismatch(&format!("{}[{}]", key, i), "string", other)),
            })
            .collect()
    }

    fn one_of<T: Copy>(&self, key: &str, allowed: &[T], name: fn(&T) -> &'static str) -> Result<T> {
        let value = self.text(key)?;
        allowed
            .iter()
            .find(|candidate| name(candidate) == value)
            .copied()
            .ok_or_else(|| {
                let names: Vec<_> = allowed.iter().map(name).collect();
                self.error(
                    key,
                    format!("must be one of {}, found `{}`", names.join(", "), value),
                )
            })
    }

    fn date(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => parse_date_string(s)
                .map(Some)
                .ok_or_else(|| self.error(key, format!("is not a valid date: `{}`", s))),
            // Numeric dates are epoch milliseconds
            Some(Value::Number(n)) => n
                .as_i64()
                .and_then(DateTime::from_timestamp_millis)
                .map(Some)
                .ok_or_else(|| self.error(key, format!("is not a valid timestamp: {}", n))),
            Some(other) => Err(self.mismatch(key, "date", other)),
        }
    }

    fn check_url(&self, key: &str, value: &str) -> Result<()> {
        url::Url::parse(value)
            .map(|_| ())
            .map_err(|e| self.error(key, format!("is not a valid URL `{}`: {}", value, e)))
    }

    fn url(&self, key: &str) -> Result<Option<String>> {
        let value = self.optional_text(key)?;
        if let Some(ref u) = value {
            self.check_url(key, u)?;
        }
        Ok(value)
    }

    fn url_list(&self, key: &str) -> Result<Vec<String>> {
        let urls = self.text_list(key)?;
        for (i, u) in urls.iter().enumerate() {
            self.check_url(&format!("{}[{}]", key, i), u)?;
        }
        Ok(urls)
    }

    fn flag(&self, key: &str) -> Result<bool> {
        match self.get(key) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(self.mismatch(key, "boolean", other)),
        }
    }

    fn number(&self, key: &str) -> Result<Option<f64>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(f) if f.is_finite() => Ok(Some(f)),
                _ => Err(self.error(key, "must be a finite number")),
            },
            Some(other) => Err(self.mismatch(key, "number", other)),
        }
    }

    /// Whole number; `3.0` is accepted as 3
    fn integer(&self, key: &str) -> Result<Option<i64>> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let Value::Number(n) = value else {
            return Err(self.mismatch(key, "integer", value));
        };
        if let Some(i) = n.as_i64() {
            return Ok(Some(i));
        }
        match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(Some(f as i64)),
            _ => Err(self.error(key, format!("expected integer, found {}", n))),
        }
    }

    fn count(&self, key: &str) -> Result<Option<u64>> {
        match self.integer(key)? {
            Some(n) if n < 0 => Err(self.error(key, "must not be negative")),
            other => Ok(other.map(|n| n as u64)),
        }
    }

    fn nested(&self, path: String, map: &'a Mapping) -> Fields<'a> {
        Fields {
            id: self.id,
            prefix: format!("{}.", path),
            map,
        }
    }

    fn record(&self, key: &str) -> Result<Option<Fields<'a>>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Mapping(map)) => Ok(Some(self.nested(self.path(key), map))),
            Some(other) => Err(self.mismatch(key, "object", other)),
        }
    }

    fn records(&self, key: &str) -> Result<Vec<Fields<'a>>> {
        self.sequence(key)?
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let item_key = format!("{}[{}]", key, i);
                match item {
                    Value::Mapping(map) => Ok(self.nested(self.path(&item_key), map)),
                    other => Err(self.mismatch(&item_key, "object", other)),
                }
            })
            .collect()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "array",
        Value::Mapping(_) => "object",
        Value::Tagged(_) => "tagged value",
    }
}
