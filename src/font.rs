//! Text rendering through a glyph atlas.
//!
//! A font is rasterized once at start-up into one single-channel texture per
//! character of a fixed character set. Drawing a string is then one quad per
//! character, with the pen moving right by each glyph's advance.
//!
//! [`FontManager`] is the entry point the chapters use. It never fails to
//! construct: a missing font or character set file is logged and the manager
//! draws nothing.

pub mod atlas;
pub mod glyph;
pub mod layout;
pub mod rasterizer;
pub mod renderer;

use std::path::Path;

use nalgebra_glm as glm;

use crate::config::AppConfig;
use crate::error::Result;
use crate::texture::Texture;
use atlas::{Charset, GlUploader, GlyphAtlas};
use rasterizer::FontdueRasterizer;
use renderer::TextRenderer;

struct LoadedFont {
    atlas: GlyphAtlas<Texture>,
    renderer: TextRenderer,
}

pub struct FontManager {
    loaded: Option<LoadedFont>,
}

impl FontManager {
    /// Font, charset and pixel height as configured.
    pub fn from_config(width: f32, height: f32, config: &AppConfig) -> Self {
        let assets = &config.assets;
        Self::new(
            width,
            height,
            assets.path(&assets.font),
            config.charset_file().as_deref(),
            config.font.pixel_height,
        )
    }

    /// `charset_file` of `None` rasterizes codes 0 through 127.
    pub fn new(
        width: f32,
        height: f32,
        font_file: impl AsRef<Path>,
        charset_file: Option<&Path>,
        pixel_height: f32,
    ) -> Self {
        let font_file = font_file.as_ref();

        if !font_file.is_file() {
            log::error!("font file {} does not exist, text is disabled", font_file.display());
            return FontManager::disabled();
        }
        if let Some(charset_file) = charset_file.filter(|path| !path.is_file()) {
            log::error!("charset file {} does not exist, text is disabled", charset_file.display());
            return FontManager::disabled();
        }

        match Self::load(width, height, font_file, charset_file, pixel_height) {
            Ok(loaded) => FontManager { loaded: Some(loaded) },
            Err(e) => {
                log::error!("{}, text is disabled", e);
                FontManager::disabled()
            }
        }
    }

    fn load(
        width: f32,
        height: f32,
        font_file: &Path,
        charset_file: Option<&Path>,
        pixel_height: f32,
    ) -> Result<LoadedFont> {
        let rasterizer = FontdueRasterizer::from_file(font_file, pixel_height)?;
        let charset = match charset_file {
            Some(path) => Charset::from_file(path)?,
            None => Charset::Ascii,
        };
        let renderer = TextRenderer::new(width, height)?;
        let atlas = GlyphAtlas::build(&rasterizer, &charset, &mut GlUploader);

        Ok(LoadedFont { atlas, renderer })
    }

    pub fn disabled() -> Self {
        FontManager { loaded: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn print_text(&self, text: &str, x: f32, y: f32, scale: f32, color: glm::Vec3) {
        if let Some(font) = &self.loaded {
            font.renderer.print_text(&font.atlas, text, x, y, scale, color);
        }
    }

    /// Width of `text` in pixels, 0 when text is disabled.
    pub fn measure(&self, text: &str, scale: f32) -> f32 {
        self.loaded
            .as_ref()
            .map_or(0.0, |font| layout::measure(&font.atlas, text, scale))
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if let Some(font) = &mut self.loaded {
            font.renderer.update_projection(width, height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // No GL calls happen on these paths
    #[test]
    fn missing_font_file_disables_text() {
        let manager = FontManager::new(800.0, 600.0, "/nonexistent/font.ttf", Some(Path::new("Cargo.toml")), 48.0);

        assert!(!manager.is_enabled());
        assert_eq!(manager.measure("hello", 1.0), 0.0);
        manager.print_text("hello", 0.0, 0.0, 1.0, glm::vec3(1.0, 1.0, 1.0));
    }

    #[test]
    fn missing_charset_file_disables_text() {
        let manager = FontManager::new(800.0, 600.0, "Cargo.toml", Some(Path::new("/nonexistent/chars.txt")), 48.0);

        assert!(!manager.is_enabled());
    }

    #[test]
    fn unparsable_font_disables_text() {
        // a file that exists but is not a font fails before any GL object is made
        let manager = FontManager::new(800.0, 600.0, "Cargo.toml", Some(Path::new("Cargo.toml")), 48.0);

        assert!(!manager.is_enabled());
    }

    #[test]
    fn ascii_charset_skips_the_charset_file_check() {
        // fails on the font, not on a charset lookup
        let manager = FontManager::new(800.0, 600.0, "Cargo.toml", None, 48.0);

        assert!(!manager.is_enabled());
    }
}
