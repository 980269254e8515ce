use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::glyph::{Glyph, RasterizedGlyph};
use super::rasterizer::GlyphRasterizer;
use crate::error::{Error, Result};
use crate::texture::Texture;

/// Substituted for any character the atlas has no glyph for.
pub const PLACEHOLDER: char = '?';

/// The characters to rasterize up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Charset {
    /// Codes 0 through 127
    Ascii,
    Chars(String),
}

impl Charset {
    /// Reads a character set file; line breaks are not part of the set.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Charset::from_text(&text))
    }

    pub fn from_text(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Charset::Chars(text.chars().filter(|c| !matches!(c, '\r' | '\n')).collect())
    }

    fn chars(&self) -> Box<dyn Iterator<Item = char> + '_> {
        match self {
            Charset::Ascii => Box::new((0u8..128).map(char::from)),
            Charset::Chars(s) => Box::new(s.chars()),
        }
    }
}

/// Turns a coverage bitmap into whatever handle the renderer binds.
pub trait GlyphUploader {
    type Handle;

    fn upload(&mut self, glyph: &RasterizedGlyph) -> Self::Handle;
}

pub struct GlUploader;

impl GlyphUploader for GlUploader {
    type Handle = Texture;

    fn upload(&mut self, glyph: &RasterizedGlyph) -> Texture {
        Texture::from_red_bitmap(&glyph.bitmap, glyph.width, glyph.height)
    }
}

/// Glyphs keyed by character, built once and read-only afterwards.
#[derive(Debug)]
pub struct GlyphAtlas<T> {
    glyphs: HashMap<char, Glyph<T>>,
}

impl<T> GlyphAtlas<T> {
    pub fn build<R, U>(rasterizer: &R, charset: &Charset, uploader: &mut U) -> Self
    where
        R: GlyphRasterizer + ?Sized,
        U: GlyphUploader<Handle = T>,
    {
        let mut glyphs = HashMap::new();
        let mut missing = 0usize;

        for ch in charset.chars().chain(std::iter::once(PLACEHOLDER)) {
            if glyphs.contains_key(&ch) {
                continue;
            }

            let Some(raster) = rasterizer.rasterize(ch) else {
                missing += 1;
                log::debug!("font has no glyph for {:?}", ch);
                continue;
            };

            let texture = if raster.is_empty() {
                None
            } else {
                Some(uploader.upload(&raster))
            };

            glyphs.insert(
                ch,
                Glyph {
                    texture,
                    size: (raster.width, raster.height),
                    bearing: raster.bearing,
                    advance: raster.advance,
                },
            );
        }

        if !glyphs.contains_key(&PLACEHOLDER) {
            log::warn!("font has no {:?} glyph, unknown characters will be skipped", PLACEHOLDER);
        }
        log::info!("glyph atlas built: {} glyphs, {} unavailable", glyphs.len(), missing);

        GlyphAtlas { glyphs }
    }

    /// The glyph for `ch`, falling back to the placeholder.
    pub fn glyph(&self, ch: char) -> Option<&Glyph<T>> {
        self.glyphs.get(&ch).or_else(|| self.glyphs.get(&PLACEHOLDER))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Every glyph is `size` pixels wide and tall except space, which is blank.
    pub(crate) struct FakeRasterizer {
        pub known: String,
        pub size: u32,
    }

    impl GlyphRasterizer for FakeRasterizer {
        fn rasterize(&self, ch: char) -> Option<RasterizedGlyph> {
            if !self.known.contains(ch) {
                return None;
            }
            let size = if ch == ' ' { 0 } else { self.size };
            Some(RasterizedGlyph {
                bitmap: vec![0xff; (size * size) as usize],
                width: size,
                height: size,
                bearing: (1, size as i32 - 2),
                advance: (size + 2) << 6,
            })
        }
    }

    #[derive(Default)]
    pub(crate) struct CountingUploader {
        pub uploaded: Vec<(u32, u32)>,
    }

    impl GlyphUploader for CountingUploader {
        type Handle = usize;

        fn upload(&mut self, glyph: &RasterizedGlyph) -> usize {
            self.uploaded.push((glyph.width, glyph.height));
            self.uploaded.len()
        }
    }

    #[test]
    fn charset_file_text_drops_line_breaks() {
        let charset = Charset::from_text("ab\r\ncd\n你好");
        assert_eq!(charset, Charset::Chars("abcd你好".to_string()));
    }

    #[test]
    fn byte_order_mark_is_not_a_character() {
        let charset = Charset::from_text("\u{feff}ab\n");
        assert_eq!(charset, Charset::Chars("ab".to_string()));
    }

    #[test]
    fn missing_charset_file_is_an_error() {
        assert!(matches!(
            Charset::from_file("/nonexistent/charset.txt"),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn builds_each_character_once() {
        let rasterizer = FakeRasterizer { known: "abc?".into(), size: 10 };
        let mut uploader = CountingUploader::default();

        let atlas = GlyphAtlas::build(&rasterizer, &Charset::from_text("abcabc"), &mut uploader);

        assert_eq!(atlas.glyphs.len(), 4);
        assert_eq!(uploader.uploaded.len(), 4);
        let a = atlas.glyph('a').unwrap();
        assert_eq!(a.size, (10, 10));
        assert_eq!(a.advance_px(), 12);
    }

    #[test]
    fn placeholder_is_loaded_even_when_not_requested() {
        let rasterizer = FakeRasterizer { known: "xy?".into(), size: 8 };
        let mut uploader = CountingUploader::default();

        let atlas = GlyphAtlas::build(&rasterizer, &Charset::from_text("xy"), &mut uploader);

        assert!(atlas.glyphs.contains_key(&PLACEHOLDER));
        assert_eq!(atlas.glyphs.len(), 3);
    }

    #[test]
    fn unknown_characters_fall_back_to_placeholder() {
        let rasterizer = FakeRasterizer { known: "a?".into(), size: 8 };
        let mut uploader = CountingUploader::default();

        let atlas = GlyphAtlas::build(&rasterizer, &Charset::from_text("a"), &mut uploader);
        let placeholder_texture = atlas.glyph(PLACEHOLDER).and_then(|g| g.texture);

        assert_eq!(atlas.glyph('z').and_then(|g| g.texture), placeholder_texture);
        assert_ne!(atlas.glyph('a').and_then(|g| g.texture), placeholder_texture);
    }

    #[test]
    fn no_placeholder_means_no_glyph() {
        let rasterizer = FakeRasterizer { known: "a".into(), size: 8 };
        let mut uploader = CountingUploader::default();

        let atlas = GlyphAtlas::build(&rasterizer, &Charset::from_text("ab"), &mut uploader);

        assert_eq!(atlas.glyphs.len(), 1);
        assert!(atlas.glyph('b').is_none());
    }

    #[test]
    fn blank_glyphs_get_no_texture() {
        let rasterizer = FakeRasterizer { known: "a ?".into(), size: 8 };
        let mut uploader = CountingUploader::default();

        let atlas = GlyphAtlas::build(&rasterizer, &Charset::from_text("a a"), &mut uploader);

        let space = atlas.glyph(' ').unwrap();
        assert!(space.texture.is_none());
        assert_eq!(space.advance_px(), 2);
        assert_eq!(uploader.uploaded, vec![(8, 8), (8, 8)]);
    }

    #[test]
    fn ascii_charset_covers_all_128_codes() {
        let known: String = (0u8..128).map(char::from).collect();
        let rasterizer = FakeRasterizer { known, size: 4 };
        let mut uploader = CountingUploader::default();

        let atlas = GlyphAtlas::build(&rasterizer, &Charset::Ascii, &mut uploader);

        assert_eq!(atlas.glyphs.len(), 128);
        assert!(atlas.glyphs.contains_key(&'\0'));
        assert!(atlas.glyphs.contains_key(&'~'));
    }
}
