use std::ffi::c_void;
use std::path::Path;
use std::rc::Rc;

use crate::error::Result;
use crate::gl_call;
use crate::shader::ShaderProgram;
use crate::texture::Texture;

#[rustfmt::skip]
pub const SPRITE_INDICES: [u32; 6] = [
    0, 1, 3,
    1, 2, 3,
];

// top right, bottom right, bottom left, top left; (x, y, u, v)
pub fn sprite_vertices(x: f32, y: f32, width: f32, height: f32) -> [f32; 16] {
    #[rustfmt::skip]
    let vertices = [
        x + width, y + height, 1.0, 1.0,
        x + width, y,          1.0, 0.0,
        x,         y,          0.0, 0.0,
        x,         y + height, 0.0, 1.0,
    ];
    vertices
}

/// An image with its own quad, drawn at a movable pixel position.
pub struct Sprite {
    texture: Texture,
    program: Rc<ShaderProgram>,
    vao: u32,
    vbo: u32,
    ebo: u32,
    x: i32,
    y: i32,
}

impl Sprite {
    pub fn load(path: impl AsRef<Path>, program: Rc<ShaderProgram>) -> Result<Self> {
        Ok(Self::with_texture(Texture::from_file(path)?, program, 0, 0))
    }

    pub fn with_texture(texture: Texture, program: Rc<ShaderProgram>, x: i32, y: i32) -> Self {
        let vertices = sprite_vertices(x as f32, y as f32, texture.width as f32, texture.height as f32);

        let mut vbo = 0;
        gl_call!(gl::CreateBuffers(1, &mut vbo));
        gl_call!(gl::NamedBufferData(
            vbo,
            std::mem::size_of_val(&vertices) as isize,
            vertices.as_ptr() as *const c_void,
            gl::DYNAMIC_DRAW, // rewritten on every move
        ));

        let mut ebo = 0;
        gl_call!(gl::CreateBuffers(1, &mut ebo));
        gl_call!(gl::NamedBufferData(
            ebo,
            std::mem::size_of_val(&SPRITE_INDICES) as isize,
            SPRITE_INDICES.as_ptr() as *const c_void,
            gl::STATIC_DRAW,
        ));

        let mut vao = 0;
        gl_call!(gl::CreateVertexArrays(1, &mut vao));
        gl_call!(gl::VertexArrayVertexBuffer(vao, 0, vbo, 0, (4 * std::mem::size_of::<f32>()) as i32));
        gl_call!(gl::VertexArrayElementBuffer(vao, ebo));
        // Same layout as the quad batch: position at 0, texture coordinates at 1
        gl_call!(gl::EnableVertexArrayAttrib(vao, 0));
        gl_call!(gl::VertexArrayAttribFormat(vao, 0, 2, gl::FLOAT, gl::FALSE, 0));
        gl_call!(gl::VertexArrayAttribBinding(vao, 0, 0));
        gl_call!(gl::EnableVertexArrayAttrib(vao, 1));
        gl_call!(gl::VertexArrayAttribFormat(
            vao,
            1,
            2,
            gl::FLOAT,
            gl::FALSE,
            (2 * std::mem::size_of::<f32>()) as u32,
        ));
        gl_call!(gl::VertexArrayAttribBinding(vao, 1, 0));

        Sprite { texture, program, vao, vbo, ebo, x, y }
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;

        let vertices = sprite_vertices(
            x as f32,
            y as f32,
            self.texture.width as f32,
            self.texture.height as f32,
        );
        gl_call!(gl::NamedBufferSubData(
            self.vbo,
            0,
            std::mem::size_of_val(&vertices) as isize,
            vertices.as_ptr() as *const c_void,
        ));
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.move_to(self.x + dx, self.y + dy);
    }

    pub fn draw(&self) {
        // Whatever a previous draw left bound must not leak into this one
        ShaderProgram::clear();
        Texture::unbind(0);

        self.program.use_program();
        self.texture.bind(0);
        gl_call!(gl::BindVertexArray(self.vao));
        gl_call!(gl::DrawElements(
            gl::TRIANGLES,
            SPRITE_INDICES.len() as i32,
            gl::UNSIGNED_INT,
            std::ptr::null(),
        ));
        gl_call!(gl::BindVertexArray(0));
    }
}

impl Drop for Sprite {
    fn drop(&mut self) {
        gl_call!(gl::DeleteVertexArrays(1, &self.vao));
        gl_call!(gl::DeleteBuffers(1, &self.vbo));
        gl_call!(gl::DeleteBuffers(1, &self.ebo));
    }
}
