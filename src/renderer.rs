use std::ffi::c_void;

use crate::gl_call;
use crate::texture::Texture;

pub const FLOATS_PER_VERTEX: usize = 4; // x, y, u, v
pub const VERTICES_PER_QUAD: usize = 6;
pub const FLOATS_PER_QUAD: usize = FLOATS_PER_VERTEX * VERTICES_PER_QUAD;

#[derive(Clone, Copy, Debug, PartialEq)]

pub struct QuadProps{
    pub position: (f32, f32), // bottom left corner
    pub size: (f32, f32),
    pub uv: (f32, f32, f32, f32), // (u, v) at bottom left, (u, v) at top right
}

impl QuadProps{
    pub fn new(position: (f32, f32), size: (f32, f32)) -> Self{
        QuadProps{position, size, uv: (0.0, 0.0, 1.0, 1.0)}
    }
}

// Two triangles: top left, bottom left, bottom right / top left, bottom right, top right
pub fn quad_vertices(quad: &QuadProps) -> [f32; FLOATS_PER_QUAD]{
    let QuadProps{position: (x, y), size: (w, h), uv: (u0, v0, u1, v1)} = *quad;

    [
        x,     y + h, u0, v1,
        x,     y,     u0, v0,
        x + w, y,     u1, v0,

        x,     y + h, u0, v1,
        x + w, y,     u1, v0,
        x + w, y + h, u1, v1,
    ]
}

/// Whole tiles covering a viewport, row by row from the bottom left.
///
/// Partial tiles at the right and top edges are not drawn.
pub fn tile_grid(viewport: (u32, u32), tile_size: (u32, u32)) -> Vec<QuadProps>{
    let (tile_w, tile_h) = tile_size;
    if tile_w == 0 || tile_h == 0 {
        return Vec::new();
    }

    let rows = viewport.1 / tile_h;
    let columns = viewport.0 / tile_w;

    let mut quads = Vec::with_capacity((rows * columns) as usize);
    for row in 0..rows{
        for column in 0..columns{
            quads.push(QuadProps::new(
                ((column * tile_w) as f32, (row * tile_h) as f32),
                (tile_w as f32, tile_h as f32),
            ));
        }
    }
    quads
}

pub struct Renderer{
    vertices: Vec<f32>,
    capacity: usize, // in quads
    vbo: u32, // Vertex Buffer Object :: GPU memory buffer
    // if we draw a lot of objects, we can use one VBO
    vao: u32, // Vertex Array Object :: contains information about VBO
}

impl Renderer {
    pub fn new(capacity: usize)-> Self {
        let capacity = capacity.max(1);
        let vertices = Vec::with_capacity(capacity * FLOATS_PER_QUAD);

        // Setup VBO
        let mut vbo = 0;
        gl_call!(gl::CreateBuffers(1, &mut vbo));

        gl_call!(gl::NamedBufferData(
            vbo,
            (capacity * FLOATS_PER_QUAD * std::mem::size_of::<f32>()) as isize, // GLsizeiptr is signed
            std::ptr::null(),
            gl::DYNAMIC_DRAW,
        ));

        // Setup VAO
        let mut vao = 0;
        let binding_index = 0;

        // (x, y, u, v) * 6
        gl_call!(gl::CreateVertexArrays(1, &mut vao));
        gl_call!(gl::VertexArrayVertexBuffer( // binding buffer to VAO
            vao,
            binding_index,
            vbo,
            0,
            (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as i32, // stride
        ));

        // Position
        gl_call!(gl::EnableVertexArrayAttrib(vao, 0));
        gl_call!(gl::VertexArrayAttribFormat(
            vao,
            0, // index
            2, // size
            gl::FLOAT,
            gl::FALSE,
            0, // offset
        ));
        gl_call!(gl::VertexArrayAttribBinding(vao, 0, binding_index));

        // Texture coordinates
        gl_call!(gl::EnableVertexArrayAttrib(vao, 1));
        gl_call!(gl::VertexArrayAttribFormat(
            vao,
            1,
            2,
            gl::FLOAT,
            gl::FALSE,
            (2 * std::mem::size_of::<f32>()) as u32,
        ));
        gl_call!(gl::VertexArrayAttribBinding(vao, 1, binding_index));

        Renderer {
            vertices,
            capacity,
            vbo,
            vao,
        }
    }

    pub fn begin_batch(&mut self){
        self.vertices.clear();
    }

    pub fn submit_quad(&mut self, quad_props: QuadProps){
        self.vertices.extend_from_slice(&quad_vertices(&quad_props));
    }

    // Uploads and draws everything submitted since `begin_batch`, `capacity` quads per draw call.
    // textures[i] is bound to unit i
    pub fn end_batch(&mut self, textures: &[&Texture]){
        for (unit, texture) in textures.iter().enumerate(){
            texture.bind(unit as u32);
        }
        gl_call!(gl::BindVertexArray(self.vao)); // vao binding : must be called before draw call

        for chunk in self.vertices.chunks(self.capacity * FLOATS_PER_QUAD){
            gl_call!(gl::NamedBufferSubData(
                self.vbo,
                0,
                (chunk.len() * std::mem::size_of::<f32>()) as isize,
                chunk.as_ptr() as *const c_void,
            ));

            gl_call!(gl::DrawArrays(
                gl::TRIANGLES,
                0,
                (chunk.len() / FLOATS_PER_VERTEX) as i32,
            ));
        }

        gl_call!(gl::BindVertexArray(0));
    }
}

impl Drop for Renderer{
    fn drop(&mut self){
        gl_call!(gl::DeleteVertexArrays(1, &self.vao));
        gl_call!(gl::DeleteBuffers(1, &self.vbo));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_is_two_triangles_sharing_a_diagonal() {
        let v = quad_vertices(&QuadProps::new((10.0, 20.0), (4.0, 8.0)));

        let corners: Vec<(f32, f32)> = v.chunks(FLOATS_PER_VERTEX).map(|c| (c[0], c[1])).collect();
        assert_eq!(corners, vec![
            (10.0, 28.0), (10.0, 20.0), (14.0, 20.0),
            (10.0, 28.0), (14.0, 20.0), (14.0, 28.0),
        ]);
    }

    #[test]
    fn uv_rect_follows_corners() {
        let quad = QuadProps{position: (0.0, 0.0), size: (1.0, 1.0), uv: (0.0, 1.0, 1.0, 0.0)};
        let v = quad_vertices(&quad);

        // top left vertex samples v1, bottom left samples v0
        assert_eq!((v[2], v[3]), (0.0, 0.0));
        assert_eq!((v[6], v[7]), (0.0, 1.0));
        assert_eq!((v[22], v[23]), (1.0, 0.0));
    }

    #[test]
    fn tile_grid_drops_partial_tiles() {
        let tiles = tile_grid((800, 600), (64, 64));

        // 600 / 64 = 9 rows, 800 / 64 = 12 columns
        assert_eq!(tiles.len(), 9 * 12);
        assert_eq!(tiles[0].position, (0.0, 0.0));
        assert_eq!(tiles[1].position, (64.0, 0.0));
        assert_eq!(tiles[12].position, (0.0, 64.0));
        assert_eq!(tiles.last().map(|t| t.position), Some((704.0, 512.0)));
    }

    #[test]
    fn tile_grid_with_oversized_or_empty_tiles() {
        assert!(tile_grid((100, 100), (200, 50)).is_empty());
        assert!(tile_grid((100, 100), (0, 10)).is_empty());
    }
}
