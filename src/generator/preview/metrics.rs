//! Horizontal text metrics for layout.
//!
//! Advances come from the typeface the preview is drawn with, so wrapping
//! matches what the rasterizer paints. Without a usable face every
//! character gets the same estimated advance.

use std::collections::HashMap;

/// Average glyph advance of a bold face, as a fraction of the font size
const AVERAGE_ADVANCE: f32 = 0.6;

/// Per-character advances in em units
#[derive(Debug, Clone, PartialEq)]
pub struct TextMetrics {
    advances: HashMap<char, f32>,
    /// Advance for characters the face has no glyph for
    missing: f32,
}

impl TextMetrics {
    /// Every character advances `em` of the font size
    pub fn uniform(em: f32) -> Self {
        Self {
            advances: HashMap::new(),
            missing: em,
        }
    }

    /// Estimate used when no face is available
    pub fn estimated() -> Self {
        Self::uniform(AVERAGE_ADVANCE)
    }

    /// Read the horizontal advances of the first face in a font file
    pub fn from_face(data: &[u8]) -> Option<Self> {
        let face = ttf_parser::Face::parse(data, 0).ok()?;
        let units = f32::from(face.units_per_em());
        if units <= 0.0 {
            return None;
        }
        let em = |glyph: ttf_parser::GlyphId| {
            face.glyph_hor_advance(glyph)
                .map(|a| f32::from(a) / units)
        };

        let mut advances = HashMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables {
                if !subtable.is_unicode() {
                    continue;
                }
                subtable.codepoints(|cp| {
                    let glyph = subtable.glyph_index(cp);
                    if let (Some(c), Some(advance)) = (char::from_u32(cp), glyph.and_then(em)) {
                        advances.entry(c).or_insert(advance);
                    }
                });
            }
        }

        // .notdef
        let missing = em(ttf_parser::GlyphId(0)).unwrap_or(AVERAGE_ADVANCE);
        Some(Self { advances, missing })
    }

    /// Advance of one character in em units
    pub fn advance(&self, c: char) -> f32 {
        self.advances.get(&c).copied().unwrap_or(self.missing)
    }

    /// Width of `text` set at `font_size`
    pub fn width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().map(|c| self.advance(c)).sum::<f32>() * font_size
    }
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self::estimated()
    }
}
