use std::ffi::c_void;
use std::path::Path;

use crate::error::{Error, Result};
use crate::gl_call;

// Owns one GL texture object, deleted on drop
#[derive(Debug)]
pub struct Texture {
    id: u32,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Loads an image file as an RGBA8 texture with mipmaps.
    ///
    /// GL puts the texture origin in the lower left corner, so rows are flipped
    /// before upload.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|source| Error::Image {
                path: path.to_path_buf(),
                source,
            })?
            .flipv()
            .into_rgba8();
        let (width, height) = image.dimensions();

        let mut id = 0;
        gl_call!(gl::CreateTextures(gl::TEXTURE_2D, 1, &mut id));

        let levels = mip_levels(width, height);
        gl_call!(gl::TextureStorage2D(id, levels, gl::RGBA8, width as i32, height as i32));
        gl_call!(gl::TextureSubImage2D(
            id,
            0, // level
            0,
            0,
            width as i32,
            height as i32,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            image.as_raw().as_ptr() as *const c_void,
        ));

        gl_call!(gl::TextureParameteri(id, gl::TEXTURE_MIN_FILTER, gl::LINEAR as i32));
        gl_call!(gl::TextureParameteri(id, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32));
        // S is x, T is y
        gl_call!(gl::TextureParameteri(id, gl::TEXTURE_WRAP_S, gl::REPEAT as i32));
        gl_call!(gl::TextureParameteri(id, gl::TEXTURE_WRAP_T, gl::REPEAT as i32));
        gl_call!(gl::GenerateTextureMipmap(id));

        log::debug!("loaded texture {} ({}x{}) from {}", id, width, height, path.display());

        Ok(Texture { id, width, height })
    }

    /// Uploads an 8-bit single-channel bitmap, top row first.
    ///
    /// Used for glyph coverage masks, so rows are not flipped and the edges are
    /// clamped to keep neighbouring texels from bleeding in.
    pub fn from_red_bitmap(bitmap: &[u8], width: u32, height: u32) -> Self {
        debug_assert_eq!(bitmap.len(), (width * height) as usize);

        let mut id = 0;
        gl_call!(gl::CreateTextures(gl::TEXTURE_2D, 1, &mut id));

        // Glyph rows are tightly packed, not 4-byte aligned
        gl_call!(gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1));
        gl_call!(gl::TextureStorage2D(id, 1, gl::R8, width as i32, height as i32));
        gl_call!(gl::TextureSubImage2D(
            id,
            0,
            0,
            0,
            width as i32,
            height as i32,
            gl::RED,
            gl::UNSIGNED_BYTE,
            bitmap.as_ptr() as *const c_void,
        ));
        gl_call!(gl::PixelStorei(gl::UNPACK_ALIGNMENT, 4));

        gl_call!(gl::TextureParameteri(id, gl::TEXTURE_MIN_FILTER, gl::LINEAR as i32));
        gl_call!(gl::TextureParameteri(id, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32));
        gl_call!(gl::TextureParameteri(id, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32));
        gl_call!(gl::TextureParameteri(id, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32));

        Texture { id, width, height }
    }

    // unit 0 is GL_TEXTURE0
    pub fn bind(&self, unit: u32) {
        gl_call!(gl::BindTextureUnit(unit, self.id));
    }

    pub fn unbind(unit: u32) {
        gl_call!(gl::BindTextureUnit(unit, 0));
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        gl_call!(gl::DeleteTextures(1, &self.id));
    }
}

/// Number of mipmap levels down to a 1x1 image.
pub fn mip_levels(width: u32, height: u32) -> i32 {
    let largest = width.max(height).max(1);
    (32 - largest.leading_zeros()) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mip_chain_reaches_one_pixel() {
        assert_eq!(mip_levels(1, 1), 1);
        assert_eq!(mip_levels(2, 1), 2);
        assert_eq!(mip_levels(256, 256), 9);
        assert_eq!(mip_levels(300, 20), 9);
        assert_eq!(mip_levels(0, 0), 1);
    }
}
