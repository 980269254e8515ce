use super::atlas::GlyphAtlas;
use super::glyph::Glyph;
use crate::renderer::{quad_vertices, QuadProps, FLOATS_PER_QUAD};

/// One glyph draw: the texture to bind and the six vertices to upload.
#[derive(Debug)]
pub struct GlyphQuad<'a, T> {
    pub texture: &'a T,
    pub vertices: [f32; FLOATS_PER_QUAD],
}

/// Places `glyph` at the pen position on the baseline `y`.
pub fn glyph_quad<T>(glyph: &Glyph<T>, pen_x: f32, y: f32, scale: f32) -> QuadProps {
    let (width, height) = glyph.size;
    let (bearing_x, bearing_y) = glyph.bearing;

    let xpos = pen_x + bearing_x as f32 * scale;
    let ypos = y - (height as f32 - bearing_y as f32) * scale;

    QuadProps {
        position: (xpos, ypos),
        size: (width as f32 * scale, height as f32 * scale),
        // bitmap rows are stored top first, so v runs downwards
        uv: (0.0, 1.0, 1.0, 0.0),
    }
}

/// Lays out `text` left to right from `(x, y)` and returns the draws in order.
///
/// Characters without a glyph (and no placeholder) are skipped without
/// moving the pen; blank glyphs move the pen but produce no draw.
pub fn layout_text<'a, T>(
    atlas: &'a GlyphAtlas<T>,
    text: &str,
    x: f32,
    y: f32,
    scale: f32,
) -> Vec<GlyphQuad<'a, T>> {
    let mut pen_x = x;
    let mut quads = Vec::with_capacity(text.len());

    for ch in text.chars() {
        let Some(glyph) = atlas.glyph(ch) else {
            continue;
        };

        if let Some(texture) = glyph.texture.as_ref() {
            let quad = glyph_quad(glyph, pen_x, y, scale);
            quads.push(GlyphQuad {
                texture,
                vertices: quad_vertices(&quad),
            });
        }

        pen_x += glyph.advance_px() as f32 * scale;
    }

    quads
}

/// Horizontal extent of `text` at `scale`, the sum of pen advances.
pub fn measure<T>(atlas: &GlyphAtlas<T>, text: &str, scale: f32) -> f32 {
    text.chars()
        .filter_map(|ch| atlas.glyph(ch))
        .map(|glyph| glyph.advance_px() as f32 * scale)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::atlas::tests::{CountingUploader, FakeRasterizer};
    use crate::font::atlas::Charset;

    fn atlas(known: &str, size: u32) -> GlyphAtlas<usize> {
        let rasterizer = FakeRasterizer { known: known.into(), size };
        let mut uploader = CountingUploader::default();
        GlyphAtlas::build(&rasterizer, &Charset::from_text(known), &mut uploader)
    }

    #[test]
    fn quad_sits_on_baseline_using_bearing() {
        let glyph = Glyph { texture: Some(()), size: (10, 20), bearing: (2, 15), advance: 12 << 6 };

        let quad = glyph_quad(&glyph, 100.0, 50.0, 1.0);

        assert_eq!(quad.position, (102.0, 45.0)); // 5 px descender below the baseline
        assert_eq!(quad.size, (10.0, 20.0));
    }

    #[test]
    fn quad_geometry_scales() {
        let glyph = Glyph { texture: Some(()), size: (10, 20), bearing: (2, 15), advance: 12 << 6 };

        let quad = glyph_quad(&glyph, 0.0, 0.0, 0.5);

        assert_eq!(quad.position, (1.0, -2.5));
        assert_eq!(quad.size, (5.0, 10.0));
    }

    #[test]
    fn pen_advances_by_whole_pixels_times_scale() {
        // advance = 10 << 6 for size 8
        let atlas = atlas("ab?", 8);

        let quads = layout_text(&atlas, "abab", 25.0, 25.0, 0.5);

        let lefts: Vec<f32> = quads.iter().map(|q| q.vertices[0]).collect();
        // bearing x = 1 -> 0.5 at half scale
        assert_eq!(lefts, vec![25.5, 30.5, 35.5, 40.5]);
    }

    #[test]
    fn each_glyph_binds_its_own_texture() {
        let atlas = atlas("ab?", 8);

        let quads = layout_text(&atlas, "ab", 0.0, 0.0, 1.0);

        assert_eq!(quads.len(), 2);
        assert_ne!(quads[0].texture, quads[1].texture);
    }

    #[test]
    fn unknown_characters_draw_the_placeholder() {
        let atlas = atlas("a?", 8);
        let placeholder = atlas.glyph('?').and_then(|g| g.texture.as_ref());

        let quads = layout_text(&atlas, "a我a", 0.0, 0.0, 1.0);

        assert_eq!(quads.len(), 3);
        assert_eq!(Some(quads[1].texture), placeholder);
        assert_eq!(quads[2].vertices[0], 21.0);
    }

    #[test]
    fn spaces_advance_without_drawing() {
        let atlas = atlas("a ?", 8);

        let quads = layout_text(&atlas, "a a", 0.0, 0.0, 1.0);

        assert_eq!(quads.len(), 2);
        // a: 10, space: 2
        assert_eq!(quads[1].vertices[0], 13.0);
    }

    #[test]
    fn empty_atlas_lays_out_nothing() {
        let atlas = atlas("", 8);

        assert!(layout_text(&atlas, "hello", 0.0, 0.0, 1.0).is_empty());
        assert_eq!(measure(&atlas, "hello", 1.0), 0.0);
    }

    #[test]
    fn measure_sums_advances() {
        let atlas = atlas("a ?", 8);

        assert_eq!(measure(&atlas, "a a", 1.0), 22.0);
        assert_eq!(measure(&atlas, "a a", 2.0), 44.0);
    }
}
