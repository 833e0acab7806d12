//! Content loader - reads project documents from the content directory

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::FrontMatter;
use crate::error::SchemaValidationError;

/// One content document with its front matter split from the body
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Stable id derived from the storage path (or a `slug` override)
    pub id: String,
    /// Full source file path
    pub source: PathBuf,
    pub front_matter: FrontMatter,
    /// Markdown body; carried along but not interpreted here
    pub body: String,
}

/// Loads raw documents from a content directory
pub struct ContentLoader {
    content_dir: PathBuf,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new<P: AsRef<Path>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
        }
    }

    /// Load every `*.md` / `*.mdx` document, ordered by path
    pub fn load(&self) -> Result<Vec<RawDocument>> {
        if !self.content_dir.exists() {
            tracing::warn!("Content directory {:?} does not exist", self.content_dir);
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();

        for entry in WalkDir::new(&self.content_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.with_context(|| format!("Failed to walk {:?}", self.content_dir))?;
            let path = entry.path();
            if path.is_file() && is_content_file(path) {
                documents.push(self.load_document(path)?);
            }
        }

        tracing::debug!(
            "Loaded {} documents from {:?}",
            documents.len(),
            self.content_dir
        );
        Ok(documents)
    }

    /// Load a single document from a file
    fn load_document(&self, path: &Path) -> Result<RawDocument> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let (front_matter, body) =
            FrontMatter::parse(&content).with_context(|| format!("In {:?}", path))?;

        let relative = path.strip_prefix(&self.content_dir).unwrap_or(path);
        let path_id = id_from_path(relative);
        let id = match front_matter.get_str("slug") {
            Some(slug) if !slug.trim().is_empty() => id_from_slug(slug)
                .map_err(|reason| SchemaValidationError::new(&path_id, "slug", reason))?,
            _ => path_id,
        };

        Ok(RawDocument {
            id,
            source: path.to_path_buf(),
            body: body.to_string(),
            front_matter,
        })
    }
}

/// Derive an entry id from a path relative to the content directory:
/// the extension is dropped and every segment is slugified.
pub fn id_from_path(relative: &Path) -> String {
    let without_ext = relative.with_extension("");
    let segments: Vec<String> = without_ext
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .map(slug::slugify)
        .filter(|s| !s.is_empty())
        .collect();

    // `foo/index.md` is the entry `foo`
    match segments.split_last() {
        Some((last, parents)) if last == "index" && !parents.is_empty() => parents.join("/"),
        _ => segments.join("/"),
    }
}

/// Normalize a `slug` override the same way path ids are built.
///
/// Each `/` segment is slugified; segments that are empty, `.`, `..` or
/// slugify to nothing are rejected so the id stays inside the output tree.
pub fn id_from_slug(raw: &str) -> Result<String, String> {
    let mut segments = Vec::new();
    for segment in raw.trim().trim_matches('/').split('/') {
        let segment = segment.trim();
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(format!("segment {:?} is not allowed in {:?}", segment, raw));
        }
        let slugged = slug::slugify(segment);
        if slugged.is_empty() {
            return Err(format!("segment {:?} has no usable characters", segment));
        }
        segments.push(slugged);
    }
    Ok(segments.join("/"))
}

/// Check if a file is a content document
fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "mdx")
        .unwrap_or(false)
}
