//! Generator module - derives the public artifacts from the validated collection
//!
//! Artifacts are independent of each other: a failure in one (a missing
//! site URL for the feed, one entry's preview image) is recorded in the
//! [`BuildReport`] and the others are still written.

pub mod feed;
pub mod preview;
pub mod search;

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::config::SiteConfig;
use crate::content::{Collection, ProjectEntry};
use crate::error::AssetLoadError;
use crate::Journal;

pub use preview::PreviewRenderer;

/// One artifact that could not be produced
#[derive(Debug)]
pub struct ArtifactFailure {
    /// Output path relative to the public directory
    pub artifact: String,
    pub error: anyhow::Error,
}

impl fmt::Display for ArtifactFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:#}", self.artifact, self.error)
    }
}

/// Outcome of one build
#[derive(Debug, Default)]
pub struct BuildReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<ArtifactFailure>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, artifact: &str, outcome: Result<PathBuf>) {
        match outcome {
            Ok(path) => {
                tracing::debug!("Wrote {:?}", path);
                self.written.push(path);
            }
            Err(error) => {
                tracing::error!("Failed to generate {}: {:#}", artifact, error);
                self.failures.push(ArtifactFailure {
                    artifact: artifact.to_string(),
                    error,
                });
            }
        }
    }
}

/// Writes search.json, rss.xml and og/{id}.png into the public directory
pub struct Generator {
    config: SiteConfig,
    public_dir: PathBuf,
    previews: PreviewRenderer,
}

impl Generator {
    /// Create a generator, loading the preview typeface once.
    ///
    /// A missing or unusable font is fatal.
    pub fn new(journal: &Journal) -> Result<Self, AssetLoadError> {
        let previews = PreviewRenderer::from_font_file(&journal.font_path)?;
        Ok(Self::with_renderer(journal, previews))
    }

    pub fn with_renderer(journal: &Journal, previews: PreviewRenderer) -> Self {
        Self {
            config: journal.config.clone(),
            public_dir: journal.public_dir.clone(),
            previews,
        }
    }

    /// Generate every artifact for the collection
    pub fn generate(&self, collection: &Collection) -> Result<BuildReport> {
        fs::create_dir_all(&self.public_dir)
            .with_context(|| format!("Failed to create {:?}", self.public_dir))?;

        let mut report = BuildReport::default();

        let search = search::render(collection)
            .context("Failed to serialize search index")
            .and_then(|json| self.write("search.json", json.as_bytes()));
        report.record("search.json", search);

        let feed = feed::render(&self.config, collection)
            .map_err(anyhow::Error::from)
            .and_then(|xml| self.write("rss.xml", xml.as_bytes()));
        report.record("rss.xml", feed);

        let entries = collection.visible_entries();
        tracing::info!("Rendering {} preview images", entries.len());
        let images: Vec<(String, Result<PathBuf>)> = entries
            .par_iter()
            .map(|entry| {
                let artifact = preview_path(entry);
                let outcome = self.preview(entry, &artifact);
                (artifact, outcome)
            })
            .collect();
        for (artifact, outcome) in images {
            report.record(&artifact, outcome);
        }

        tracing::info!(
            "Wrote {} artifacts to {:?} ({} failed)",
            report.written.len(),
            self.public_dir,
            report.failures.len()
        );
        Ok(report)
    }

    fn preview(&self, entry: &ProjectEntry, artifact: &str) -> Result<PathBuf> {
        let png = self
            .previews
            .render(entry)
            .with_context(|| format!("Cannot render preview for `{}`", entry.id))?;
        self.write(artifact, &png)
    }

    fn write(&self, artifact: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.public_dir.join(artifact);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        fs::write(&path, bytes).with_context(|| format!("Failed to write {:?}", path))?;
        Ok(path)
    }

    /// Pick up a reloaded site configuration, keeping the loaded font
    pub fn reconfigure(&mut self, journal: &Journal) {
        self.config = journal.config.clone();
        self.public_dir = journal.public_dir.clone();
    }
}

/// `og/{id}.png`; ids containing `/` land in nested directories
pub fn preview_path(entry: &ProjectEntry) -> String {
    format!("og/{}.png", entry.id)
}

#[cfg(test)]
mod tests {
    use super::preview::tests::{fontless_renderer, FailingBackend};
    use super::*;
    use crate::test_helpers::{draft, entry};
    use std::path::Path;

    fn journal(dir: &Path, url: Option<&str>) -> Journal {
        let mut journal = Journal::new(dir).unwrap();
        journal.config.url = url.map(str::to_string);
        journal
    }

    fn collection() -> Collection {
        Collection::from_entries(vec![
            entry("tetris", "2024-01-01"),
            entry("2024/snake", "2024-06-01"),
            draft("secret", "2024-03-01"),
        ])
    }

    #[test]
    fn test_generate_all_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let journal = journal(dir.path(), Some("https://journal.example.com"));
        let generator = Generator::with_renderer(&journal, fontless_renderer());

        let report = generator.generate(&collection()).unwrap();
        assert!(report.is_success(), "{:?}", report.failures);
        assert_eq!(report.written.len(), 4);

        let public = &journal.public_dir;
        assert!(public.join("search.json").exists());
        assert!(public.join("rss.xml").exists());
        assert!(public.join("og/tetris.png").exists());
        assert!(public.join("og/2024/snake.png").exists());
        assert!(!public.join("og/secret.png").exists());
    }

    #[test]
    fn test_missing_site_url_only_fails_feed() {
        let dir = tempfile::tempdir().unwrap();
        let journal = journal(dir.path(), None);
        let generator = Generator::with_renderer(&journal, fontless_renderer());

        let report = generator.generate(&collection()).unwrap();
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].artifact, "rss.xml");
        assert!(report.failures[0].to_string().contains("not configured"));
        assert!(journal.public_dir.join("search.json").exists());
        assert!(journal.public_dir.join("og/tetris.png").exists());
        assert!(!journal.public_dir.join("rss.xml").exists());
    }

    #[test]
    fn test_preview_failure_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let journal = journal(dir.path(), Some("https://journal.example.com"));
        let renderer = PreviewRenderer::new(Box::new(FailingBackend { marker: "BROKEN" }), "Inter");
        let generator = Generator::with_renderer(&journal, renderer);

        let mut broken = entry("broken", "2024-02-01");
        broken.title = "BROKEN".to_string();
        let collection = Collection::from_entries(vec![entry("fine", "2024-01-01"), broken]);

        let report = generator.generate(&collection).unwrap();
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].artifact, "og/broken.png");
        assert!(journal.public_dir.join("og/fine.png").exists());
        assert!(journal.public_dir.join("rss.xml").exists());
    }

    #[test]
    fn test_regenerate_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let journal = journal(dir.path(), Some("https://journal.example.com"));
        let generator = Generator::with_renderer(&journal, fontless_renderer());

        generator.generate(&collection()).unwrap();
        let first = fs::read(journal.public_dir.join("og/tetris.png")).unwrap();
        generator.generate(&collection()).unwrap();
        let second = fs::read(journal.public_dir.join("og/tetris.png")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reconfigure_picks_up_site_url() {
        let dir = tempfile::tempdir().unwrap();
        let mut generator = Generator::with_renderer(&journal(dir.path(), None), fontless_renderer());
        generator.reconfigure(&journal(dir.path(), Some("https://journal.example.com")));

        let report = generator.generate(&collection()).unwrap();
        assert!(report.is_success());
    }

    #[test]
    fn test_missing_font_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let journal = journal(dir.path(), None);
        assert!(matches!(
            Generator::new(&journal),
            Err(AssetLoadError::Io { .. })
        ));
    }
}
