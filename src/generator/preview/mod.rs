//! Social preview images
//!
//! Two-stage pipeline, one entry per call:
//!
//! | Stage | Input | Output |
//! |-------|-------|--------|
//! | [`layout::build`] | [`PreviewCard`] | layout tree |
//! | [`svg::render`] | layout tree | SVG markup |
//! | [`RasterBackend::rasterize`] | SVG markup | PNG bytes |
//!
//! The renderer is created once per process and shared read-only; the
//! font is never reloaded.

pub mod layout;
pub mod metrics;
pub mod raster;
pub mod svg;

use std::path::Path;

pub use metrics::TextMetrics;
pub use raster::{FontAsset, RasterBackend, ResvgBackend};

use crate::content::ProjectEntry;
use crate::error::{AssetLoadError, RasterizationError};

/// The part of an entry the preview shows.
///
/// `status` stays a plain string so values outside the known set still render.
#[derive(Debug, Clone, Copy)]
pub struct PreviewCard<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub status: &'a str,
    pub tech_stack: &'a [String],
}

impl<'a> From<&'a ProjectEntry> for PreviewCard<'a> {
    fn from(entry: &'a ProjectEntry) -> Self {
        Self {
            title: &entry.title,
            description: &entry.description,
            status: entry.status.as_str(),
            tech_stack: &entry.tech_stack,
        }
    }
}

/// Renders preview PNGs
pub struct PreviewRenderer {
    backend: Box<dyn RasterBackend>,
    font_family: String,
    metrics: TextMetrics,
}

impl PreviewRenderer {
    /// Text is measured with estimated advances until [`Self::with_metrics`]
    pub fn new(backend: Box<dyn RasterBackend>, font_family: impl Into<String>) -> Self {
        Self {
            backend,
            font_family: font_family.into(),
            metrics: TextMetrics::estimated(),
        }
    }

    pub fn with_metrics(mut self, metrics: TextMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Load the typeface and set up the `resvg` backend
    pub fn from_font_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetLoadError> {
        Ok(Self::from_font(FontAsset::load(path)?))
    }

    /// Lay out with the face's advances and rasterize with the same face
    pub fn from_font(font: FontAsset) -> Self {
        let family = font.family.clone();
        let metrics = font.metrics.clone();
        Self::new(Box::new(ResvgBackend::new(font)), family).with_metrics(metrics)
    }

    /// Vector stage only
    pub fn svg(&self, card: &PreviewCard<'_>) -> String {
        let tree = layout::build(card);
        svg::render(
            &tree,
            layout::WIDTH,
            layout::HEIGHT,
            &self.font_family,
            &self.metrics,
        )
    }

    /// Render a card to PNG bytes
    pub fn render_card(&self, card: &PreviewCard<'_>) -> Result<Vec<u8>, RasterizationError> {
        let markup = self.svg(card);
        self.backend
            .rasterize(&markup, layout::WIDTH, layout::HEIGHT)
    }

    /// Render one entry to PNG bytes
    pub fn render(&self, entry: &ProjectEntry) -> Result<Vec<u8>, RasterizationError> {
        self.render_card(&PreviewCard::from(entry))
    }
}
