use std::ffi::c_void;

use crate::gl_call;

/// Float offsets of each attribute in an interleaved vertex, plus the total.
///
/// `layout` lists the component count of each attribute in location order.
pub fn attribute_offsets(layout: &[i32]) -> (Vec<usize>, usize) {
    let mut offsets = Vec::with_capacity(layout.len());
    let mut stride = 0;
    for &size in layout {
        offsets.push(stride);
        stride += size as usize;
    }
    (offsets, stride)
}

/// Static geometry: one interleaved vertex buffer and an optional index buffer.
pub struct Mesh {
    vao: u32,
    vbo: u32,
    ebo: Option<u32>,
    count: i32,
}

impl Mesh {
    pub fn new(vertices: &[f32], layout: &[i32], indices: Option<&[u32]>) -> Self {
        let (offsets, stride) = attribute_offsets(layout);
        let float_size = std::mem::size_of::<f32>();

        let mut vbo = 0;
        gl_call!(gl::CreateBuffers(1, &mut vbo));
        gl_call!(gl::NamedBufferData(
            vbo,
            std::mem::size_of_val(vertices) as isize,
            vertices.as_ptr() as *const c_void,
            gl::STATIC_DRAW,
        ));

        let mut vao = 0;
        gl_call!(gl::CreateVertexArrays(1, &mut vao));
        gl_call!(gl::VertexArrayVertexBuffer(vao, 0, vbo, 0, (stride * float_size) as i32));

        for (location, (&size, offset)) in layout.iter().zip(offsets).enumerate() {
            let location = location as u32;
            gl_call!(gl::EnableVertexArrayAttrib(vao, location));
            gl_call!(gl::VertexArrayAttribFormat(
                vao,
                location,
                size,
                gl::FLOAT,
                gl::FALSE,
                (offset * float_size) as u32,
            ));
            gl_call!(gl::VertexArrayAttribBinding(vao, location, 0));
        }

        let ebo = indices.map(|indices| {
            let mut ebo = 0;
            gl_call!(gl::CreateBuffers(1, &mut ebo));
            gl_call!(gl::NamedBufferData(
                ebo,
                std::mem::size_of_val(indices) as isize,
                indices.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            ));
            gl_call!(gl::VertexArrayElementBuffer(vao, ebo));
            ebo
        });

        let count = match indices {
            Some(indices) => indices.len(),
            None => vertices.len() / stride.max(1),
        } as i32;

        Mesh { vao, vbo, ebo, count }
    }

    pub fn draw(&self) {
        gl_call!(gl::BindVertexArray(self.vao));
        if self.ebo.is_some() {
            gl_call!(gl::DrawElements(gl::TRIANGLES, self.count, gl::UNSIGNED_INT, std::ptr::null()));
        } else {
            gl_call!(gl::DrawArrays(gl::TRIANGLES, 0, self.count));
        }
        gl_call!(gl::BindVertexArray(0));
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        gl_call!(gl::DeleteVertexArrays(1, &self.vao));
        gl_call!(gl::DeleteBuffers(1, &self.vbo));
        if let Some(ebo) = self.ebo {
            gl_call!(gl::DeleteBuffers(1, &ebo));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_for_position_and_texture_coordinates() {
        assert_eq!(attribute_offsets(&[3, 2]), (vec![0, 3], 5));
        assert_eq!(attribute_offsets(&[3]), (vec![0], 3));
        assert_eq!(attribute_offsets(&[]), (vec![], 0));
    }
}
