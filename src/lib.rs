//! project-journal: a schema-validated collection of project write-ups
//!
//! This crate loads project documents, validates their front matter and
//! derives three public artifacts from the visible entries: a JSON search
//! index, an RSS feed and one social preview image per entry.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod techniques;

#[cfg(test)]
pub(crate) mod test_helpers;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use content::{Collection, ContentLoader};

/// The main Journal application
#[derive(Debug, Clone)]
pub struct Journal {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Project documents
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Bold typeface for preview images
    pub font_path: PathBuf,
}

impl Journal {
    /// Create a new Journal instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let font_path = base_dir.join(&config.font_path);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            public_dir,
            font_path,
        })
    }

    /// Override the configured site root URL
    pub fn with_site_url(mut self, url: Option<String>) -> Self {
        if url.is_some() {
            self.config.url = url;
        }
        self
    }

    /// Load and validate every project document
    pub fn load_collection(&self) -> Result<Collection> {
        let documents = ContentLoader::new(&self.content_dir).load()?;
        let collection = Collection::from_documents(&documents)
            .with_context(|| format!("Invalid content in {:?}", self.content_dir))?;
        tracing::info!(
            "Loaded {} projects ({} drafts)",
            collection.all().len(),
            collection.draft_count()
        );
        Ok(collection)
    }

    /// Generate all public artifacts
    pub fn build(&self) -> Result<generator::BuildReport> {
        commands::build::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Scaffold a new draft project
    pub fn new_project(&self, title: &str) -> Result<PathBuf> {
        commands::new::create_project(self, title)
    }
}
