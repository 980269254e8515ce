// Vertex Shader
// => 3D Space -> 2D Space (Position of Vertex)

// Fragment Shader
// => 2D Space (Position) -> 2D Space (Color of Pixel)
use gl;
use nalgebra_glm as glm;

use std::{ffi::{CString, CStr}, cell::RefCell, collections::HashMap};

use crate::error::{Error, Result};
use crate::gl_call;

#[derive(Debug)]
pub struct ShaderPart{
    id: u32,
}

impl ShaderPart{
    pub fn from_source(source: &CStr, kind: gl::types::GLenum) -> Result<ShaderPart> {
        let id: u32 = shader_from_source(source, kind)?;
        Ok(ShaderPart{id})
    }

    pub fn from_vert_source(source: &CStr) -> Result<ShaderPart> {
        ShaderPart::from_source(source, gl::VERTEX_SHADER)
    }

    pub fn from_frag_source(source: &CStr) -> Result<ShaderPart> {
        ShaderPart::from_source(source, gl::FRAGMENT_SHADER)
    }
}

// When we drop ShaderPart, we want to delete the shader
impl Drop for ShaderPart{
    fn drop(&mut self){
        gl_call!(gl::DeleteShader(self.id));
    }
}

fn shader_from_source(source: &CStr, kind: gl::types::GLenum) -> Result<gl::types::GLuint> {
    let id : u32 = gl_call!(gl::CreateShader(kind));
    gl_call!(gl::ShaderSource(id, 1, &source.as_ptr(), std::ptr::null()));
    gl_call!(gl::CompileShader(id));

    let mut success: gl::types::GLint = 1;
    gl_call!(gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut success));

    if success == 0{
        let mut len: gl::types::GLint = 0;
        gl_call!(gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len));

        let error = create_whitespace_cstring_with_len(len as usize);

        gl_call!(gl::GetShaderInfoLog(
            id,
            len,
            std::ptr::null_mut(),
            error.as_ptr() as *mut gl::types::GLchar,
        ));
        gl_call!(gl::DeleteShader(id));

        return Err(Error::ShaderCompile(error.to_string_lossy().into_owned()));
    }

    Ok(id)
}

fn create_whitespace_cstring_with_len(len: usize) -> CString{
    let mut buffer: Vec<u8> = Vec::with_capacity(len + 1);
    buffer.extend([b' '].iter().cycle().take(len));

    unsafe {CString::from_vec_unchecked(buffer)}
}

/// Orthographic projection without a depth range: z passes through unchanged.
///
/// Maps `left..right` and `bottom..top` onto clip space `-1..1`, which is what
/// screen-space text and sprites want.
pub fn ortho_2d(left: f32, right: f32, bottom: f32, top: f32) -> glm::Mat4 {
    let mut result = glm::Mat4::identity();
    result[(0, 0)] = 2.0 / (right - left);
    result[(1, 1)] = 2.0 / (top - bottom);
    result[(0, 3)] = -(right + left) / (right - left);
    result[(1, 3)] = -(top + bottom) / (top - bottom);
    result
}

#[derive(Debug)]

pub struct ShaderProgram{
    id: u32,
    uniform_cache: RefCell<HashMap<String, i32>>,
}

impl ShaderProgram{
    pub fn use_program(&self){
        gl_call!(gl::UseProgram(self.id));
    }

    // Unbinds whatever program is current
    pub fn clear(){
        gl_call!(gl::UseProgram(0));
    }

    pub fn from_shaders(vertex: ShaderPart, fragment: ShaderPart) -> Result<ShaderProgram>{
        let program_id = gl_call!(gl::CreateProgram());

        gl_call!(gl::AttachShader(program_id, vertex.id));
        gl_call!(gl::AttachShader(program_id, fragment.id));
        gl_call!(gl::LinkProgram(program_id));

        let mut success: gl::types::GLint = 1;
        gl_call!(gl::GetProgramiv(program_id, gl::LINK_STATUS, &mut success));

        if success == 0{
            let mut len: gl::types::GLint = 0;
            gl_call!(gl::GetProgramiv(program_id, gl::INFO_LOG_LENGTH, &mut len));

            let error: CString = create_whitespace_cstring_with_len(len as usize);

            gl_call!(gl::GetProgramInfoLog(
                program_id,
                len,
                std::ptr::null_mut(),
                error.as_ptr() as *mut gl::types::GLchar,
            ));
            gl_call!(gl::DeleteProgram(program_id));

            return Err(Error::ShaderLink(error.to_string_lossy().into_owned()));
        }

        gl_call!(gl::DetachShader(program_id, vertex.id));
        gl_call!(gl::DetachShader(program_id, fragment.id));

        Ok(ShaderProgram {id : program_id, uniform_cache: RefCell::new(HashMap::new())})
    }

    /// Compiles and links a vertex/fragment pair given as GLSL text.
    pub fn from_sources(vert: &str, frag: &str) -> Result<ShaderProgram> {
        let vert = CString::new(vert).map_err(|e| Error::ShaderCompile(e.to_string()))?;
        let frag = CString::new(frag).map_err(|e| Error::ShaderCompile(e.to_string()))?;

        let vert = ShaderPart::from_vert_source(&vert)?;
        let frag = ShaderPart::from_frag_source(&frag)?;

        ShaderProgram::from_shaders(vert, frag)
    }

    // -1 is cached too, so a missing uniform is only reported once
    fn uniform_location(&self, name: &str) -> i32 {
        if let Some(&location) = self.uniform_cache.borrow().get(name) {
            return location;
        }

        let location = match CString::new(name) {
            Ok(c_name) => gl_call!(gl::GetUniformLocation(self.id, c_name.as_ptr())),
            Err(_) => -1,
        };

        if location == -1 {
            log::warn!("uniform `{}` not found in program {}", name, self.id);
        }

        self.uniform_cache.borrow_mut().insert(name.to_owned(), location);
        location
    }

    pub fn set_uniform_1i(&self, name: &str, value: i32) {
        self.use_program();
        gl_call!(gl::Uniform1i(self.uniform_location(name), value));
    }

    pub fn set_uniform_1f(&self, name: &str, value: f32) {
        self.use_program();
        gl_call!(gl::Uniform1f(self.uniform_location(name), value));
    }

    pub fn set_uniform_3f(&self, name: &str, value: &glm::Vec3) {
        self.use_program();
        gl_call!(gl::Uniform3f(self.uniform_location(name), value.x, value.y, value.z));
    }

    // nalgebra stores column-major, same as GL, so no transpose
    pub fn set_uniform_matrix4fv(&self, name: &str, matrix: &glm::Mat4) {
        self.use_program();
        gl_call!(gl::UniformMatrix4fv(
            self.uniform_location(name),
            1,
            gl::FALSE,
            matrix.as_ptr(),
        ));
    }
}

impl Drop for ShaderProgram{
    fn drop(&mut self){
        gl_call!(gl::DeleteProgram(self.id));
    }
}
