/// Bitmap and metrics for one character, as produced by a rasterizer.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterizedGlyph {
    /// 8-bit coverage, row-major, top row first
    pub bitmap: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Offset from the pen origin to the bitmap's top left corner, y up
    pub bearing: (i32, i32),
    /// Horizontal pen displacement in 1/64 pixel units
    pub advance: u32,
}

impl RasterizedGlyph {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A glyph in the atlas. `texture` is `None` for blank glyphs such as space,
/// which are never drawn but still move the pen.
#[derive(Debug)]
pub struct Glyph<T> {
    pub texture: Option<T>,
    pub size: (u32, u32),
    pub bearing: (i32, i32),
    pub advance: u32,
}

impl<T> Glyph<T> {
    /// Pen displacement in whole pixels.
    pub fn advance_px(&self) -> u32 {
        self.advance >> 6
    }
}
