use std::ffi::c_void;

use nalgebra_glm as glm;

use super::atlas::GlyphAtlas;
use super::layout::layout_text;
use crate::error::Result;
use crate::gl_call;
use crate::renderer::{FLOATS_PER_QUAD, FLOATS_PER_VERTEX, VERTICES_PER_QUAD};
use crate::shader::{ortho_2d, ShaderProgram};
use crate::texture::Texture;

/// Draws text one glyph quad at a time through a single shared vertex buffer.
pub struct TextRenderer {
    vao: u32,
    vbo: u32,
    program: ShaderProgram,
    projection: glm::Mat4,
}

impl TextRenderer {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let program = ShaderProgram::from_sources(
            include_str!("../shaders/text.vert"),
            include_str!("../shaders/text.frag"),
        )?;

        let mut vbo = 0;
        gl_call!(gl::CreateBuffers(1, &mut vbo));
        // One quad, rewritten for every glyph
        gl_call!(gl::NamedBufferData(
            vbo,
            (FLOATS_PER_QUAD * std::mem::size_of::<f32>()) as isize,
            std::ptr::null(),
            gl::DYNAMIC_DRAW,
        ));

        let mut vao = 0;
        gl_call!(gl::CreateVertexArrays(1, &mut vao));
        gl_call!(gl::VertexArrayVertexBuffer(
            vao,
            0,
            vbo,
            0,
            (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as i32,
        ));
        // vec4 vertex: position in xy, texture coordinates in zw
        gl_call!(gl::EnableVertexArrayAttrib(vao, 0));
        gl_call!(gl::VertexArrayAttribFormat(vao, 0, 4, gl::FLOAT, gl::FALSE, 0));
        gl_call!(gl::VertexArrayAttribBinding(vao, 0, 0));

        Ok(TextRenderer {
            vao,
            vbo,
            program,
            projection: ortho_2d(0.0, width, 0.0, height),
        })
    }

    /// Ignored for an empty viewport, which would make the projection NaN.
    pub fn update_projection(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.projection = ortho_2d(0.0, width, 0.0, height);
        }
    }

    /// Draws `text` with its baseline at `y`, starting at `x`, in window pixels
    /// from the bottom left.
    pub fn print_text(
        &self,
        atlas: &GlyphAtlas<Texture>,
        text: &str,
        x: f32,
        y: f32,
        scale: f32,
        color: glm::Vec3,
    ) {
        self.program.use_program();
        self.program.set_uniform_matrix4fv("projection", &self.projection);
        self.program.set_uniform_3f("textColor", &color);

        gl_call!(gl::BindVertexArray(self.vao));

        for quad in layout_text(atlas, text, x, y, scale) {
            gl_call!(gl::NamedBufferSubData(
                self.vbo,
                0,
                (quad.vertices.len() * std::mem::size_of::<f32>()) as isize,
                quad.vertices.as_ptr() as *const c_void,
            ));
            quad.texture.bind(0);
            gl_call!(gl::DrawArrays(gl::TRIANGLES, 0, VERTICES_PER_QUAD as i32));
        }

        gl_call!(gl::BindVertexArray(0));
        Texture::unbind(0);
    }
}

impl Drop for TextRenderer {
    fn drop(&mut self) {
        gl_call!(gl::DeleteVertexArrays(1, &self.vao));
        gl_call!(gl::DeleteBuffers(1, &self.vbo));
    }
}
