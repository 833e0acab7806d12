//! Raster stage: SVG markup to PNG bytes
//!
//! [`RasterBackend`] keeps the bitmap stage swappable. The production
//! implementation is [`ResvgBackend`], which owns a font database built
//! once from the bold typeface and shared by every render.

use resvg::tiny_skia;
use resvg::usvg::{self, fontdb};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use super::metrics::TextMetrics;
use crate::error::{AssetLoadError, RasterizationError};

/// Turns SVG markup into PNG bytes
pub trait RasterBackend: Send + Sync {
    fn rasterize(&self, svg: &str, width: u32, height: u32) -> Result<Vec<u8>, RasterizationError>;
}

/// The typeface the preview text is drawn with
#[derive(Clone)]
pub struct FontAsset {
    /// Family name as declared by the font file
    pub family: String,
    pub database: Arc<fontdb::Database>,
    /// Advances used to lay text out
    pub metrics: TextMetrics,
}

impl FontAsset {
    /// Read and register a font file.
    ///
    /// Fails if the file cannot be read or holds no usable face.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AssetLoadError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| AssetLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let metrics = TextMetrics::from_face(&data);

        let mut database = fontdb::Database::new();
        database.load_font_data(data);

        let family = database
            .faces()
            .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
            .ok_or_else(|| AssetLoadError::NoFaces(path.to_path_buf()))?;

        let metrics = metrics.unwrap_or_else(|| {
            tracing::warn!("No glyph metrics in {:?}, estimating text widths", path);
            TextMetrics::estimated()
        });

        tracing::debug!("Loaded font family {} from {:?}", family, path);
        Ok(Self {
            family,
            database: Arc::new(database),
            metrics,
        })
    }

    /// No faces registered: text is skipped when rasterizing and laid out
    /// with estimated advances
    pub fn empty(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            database: Arc::new(fontdb::Database::new()),
            metrics: TextMetrics::estimated(),
        }
    }
}

impl fmt::Debug for FontAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontAsset")
            .field("family", &self.family)
            .field("faces", &self.database.len())
            .finish()
    }
}

/// `resvg` rasterizer
pub struct ResvgBackend {
    font: FontAsset,
}

impl ResvgBackend {
    pub fn new(font: FontAsset) -> Self {
        Self { font }
    }
}

impl RasterBackend for ResvgBackend {
    fn rasterize(&self, svg: &str, width: u32, height: u32) -> Result<Vec<u8>, RasterizationError> {
        let mut options = usvg::Options::default();
        options.fontdb = Arc::clone(&self.font.database);
        options.font_family = self.font.family.clone();

        let tree = usvg::Tree::from_str(svg, &options)
            .map_err(|e| RasterizationError::Markup(e.to_string()))?;

        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or(RasterizationError::Canvas { width, height })?;

        let size = tree.size();
        let transform = tiny_skia::Transform::from_scale(
            width as f32 / size.width(),
            height as f32 / size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| RasterizationError::Encode(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A backend with no fonts registered; text is skipped but shapes render
    pub(crate) fn fontless_backend() -> ResvgBackend {
        ResvgBackend::new(FontAsset::empty("Inter"))
    }

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20" viewBox="0 0 40 20"><rect x="0" y="0" width="40" height="20" fill="#0f172a"/></svg>"##;

    #[test]
    fn test_rasterize_png() {
        let png = fontless_backend().rasterize(SQUARE, 40, 20).unwrap();
        let img = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (40, 20));
        assert_eq!(img.get_pixel(5, 5).0, [0x0f, 0x17, 0x2a, 255]);
    }

    #[test]
    fn test_malformed_markup() {
        let err = fontless_backend().rasterize("<svg", 40, 20).unwrap_err();
        assert!(matches!(err, RasterizationError::Markup(_)));
    }

    #[test]
    fn test_zero_canvas() {
        let err = fontless_backend().rasterize(SQUARE, 0, 20).unwrap_err();
        assert!(matches!(err, RasterizationError::Canvas { .. }));
    }

    #[test]
    fn test_missing_font_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FontAsset::load(dir.path().join("Inter-Bold.ttf")).unwrap_err();
        assert!(matches!(err, AssetLoadError::Io { .. }));
    }

    #[test]
    fn test_font_file_without_faces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        fs::write(&path, b"definitely not a font").unwrap();
        let err = FontAsset::load(&path).unwrap_err();
        assert!(matches!(err, AssetLoadError::NoFaces(_)));
    }

    #[test]
    fn test_font_asset_debug() {
        let font = FontAsset::empty("Inter");
        assert_eq!(format!("{:?}", font), r#"FontAsset { family: "Inter", faces: 0 }"#);
    }

    #[test]
    fn test_loaded_font_carries_metrics() {
        let path = Path::new("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf");
        if !path.exists() {
            return;
        }
        let font = FontAsset::load(path).unwrap();
        assert_ne!(font.metrics, TextMetrics::estimated());
        assert!(font.metrics.advance('W') > font.metrics.advance('i'));
    }
}
