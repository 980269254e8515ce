use std::fs;
use std::path::Path;

use fontdue::{Font, FontSettings, Metrics};

use super::glyph::RasterizedGlyph;
use crate::error::{Error, Result};

pub const DEFAULT_PIXEL_HEIGHT: f32 = 48.0;

pub trait GlyphRasterizer {
    /// `None` when the font has no glyph for `ch`.
    fn rasterize(&self, ch: char) -> Option<RasterizedGlyph>;
}

pub struct FontdueRasterizer {
    font: Font,
    pixel_height: f32,
}

impl FontdueRasterizer {
    pub fn from_bytes(bytes: &[u8], pixel_height: f32) -> Result<Self> {
        let settings = FontSettings {
            scale: pixel_height,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(bytes, settings).map_err(|e| Error::Font(e.to_string()))?;

        Ok(FontdueRasterizer { font, pixel_height })
    }

    pub fn from_file(path: impl AsRef<Path>, pixel_height: f32) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
        let rasterizer = Self::from_bytes(&bytes, pixel_height)?;

        log::info!(
            "loaded font {} ({} glyphs) at {}px",
            path.display(),
            rasterizer.font.glyph_count(),
            pixel_height
        );
        Ok(rasterizer)
    }
}

impl GlyphRasterizer for FontdueRasterizer {
    fn rasterize(&self, ch: char) -> Option<RasterizedGlyph> {
        if !has_glyph(ch, self.font.lookup_glyph_index(ch)) {
            return None;
        }

        let (metrics, bitmap) = self.font.rasterize(ch, self.pixel_height);
        Some(raster_from(&metrics, bitmap))
    }
}

// Index 0 is .notdef, which only NUL legitimately maps to
fn has_glyph(ch: char, glyph_index: u16) -> bool {
    ch == '\0' || glyph_index != 0
}

/// FreeType-style metrics: bearing is the top left corner relative to the
/// pen on the baseline, advance is in 1/64 pixels.
fn raster_from(metrics: &Metrics, bitmap: Vec<u8>) -> RasterizedGlyph {
    RasterizedGlyph {
        bitmap,
        width: metrics.width as u32,
        height: metrics.height as u32,
        // fontdue's ymin is the bottom edge relative to the baseline
        bearing: (metrics.xmin, metrics.ymin + metrics.height as i32),
        advance: to_26_6(metrics.advance_width),
    }
}

fn to_26_6(pixels: f32) -> u32 {
    (pixels * 64.0).round().max(0.0) as u32
}
