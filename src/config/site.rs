//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::JournalError;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,

    /// Site root URL, e.g. `https://journal.example.com/`.
    /// Only the feed needs it, so it may be left unset.
    pub url: Option<String>,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    /// Bold typeface used by the preview images
    pub font_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Project Journal".to_string(),
            description: "Documenting AI-assisted development projects built with Claude Code."
                .to_string(),
            language: "en".to_string(),
            url: None,
            content_dir: "src/content/projects".to_string(),
            public_dir: "dist".to_string(),
            font_path: "public/fonts/Inter-Bold.ttf".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }

    /// The parsed site root, or the reason an artifact that needs it cannot be built
    pub fn site_url(&self, artifact: &'static str) -> Result<url::Url, JournalError> {
        let raw = self
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(JournalError::MissingSiteConfiguration { artifact })?;

        url::Url::parse(raw).map_err(|source| JournalError::InvalidSiteUrl {
            url: raw.to_string(),
            source,
        })
    }
}
