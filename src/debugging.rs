use std::ffi::{c_void, CStr};

use gl::types::{GLchar, GLenum, GLsizei, GLuint};

// Wraps a raw GL call in `unsafe` and drains the error queue afterwards in debug builds
#[macro_export]
macro_rules! gl_call {
    ($call:expr) => {{
        #[allow(unused_unsafe)]
        let result = unsafe { $call };
        #[cfg(debug_assertions)]
        $crate::debugging::drain_gl_errors(file!(), line!(), stringify!($call));
        result
    }};
}

pub fn error_name(code: GLenum) -> &'static str {
    match code {
        gl::INVALID_ENUM => "INVALID_ENUM",
        gl::INVALID_VALUE => "INVALID_VALUE",
        gl::INVALID_OPERATION => "INVALID_OPERATION",
        gl::STACK_OVERFLOW => "STACK_OVERFLOW",
        gl::STACK_UNDERFLOW => "STACK_UNDERFLOW",
        gl::OUT_OF_MEMORY => "OUT_OF_MEMORY",
        gl::INVALID_FRAMEBUFFER_OPERATION => "INVALID_FRAMEBUFFER_OPERATION",
        _ => "UNKNOWN_ERROR",
    }
}

pub fn drain_gl_errors(file: &str, line: u32, call: &str) {
    loop {
        let code = unsafe { gl::GetError() };
        if code == gl::NO_ERROR {
            break;
        }
        log::error!("{} at {}:{} in `{}`", error_name(code), file, line, call);
    }
}

extern "system" fn debug_message_callback(
    source: GLenum,
    kind: GLenum,
    id: GLuint,
    severity: GLenum,
    _length: GLsizei,
    message: *const GLchar,
    _user_param: *mut c_void,
) {
    if message.is_null() {
        return;
    }
    let message = unsafe { CStr::from_ptr(message) }.to_string_lossy();

    // (source, type, id) are enough to grep for a message in the driver docs
    match severity {
        gl::DEBUG_SEVERITY_HIGH => {
            log::error!("GL[{:#x}/{:#x}/{}] {}", source, kind, id, message)
        }
        gl::DEBUG_SEVERITY_MEDIUM | gl::DEBUG_SEVERITY_LOW => {
            log::warn!("GL[{:#x}/{:#x}/{}] {}", source, kind, id, message)
        }
        _ => log::trace!("GL[{:#x}/{:#x}/{}] {}", source, kind, id, message),
    }
}

// Requires a debug context, see `WindowHint::OpenGlDebugContext`
pub fn enable_debug_output() {
    gl_call!(gl::Enable(gl::DEBUG_OUTPUT));
    gl_call!(gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS));
    gl_call!(gl::DebugMessageCallback(
        Some(debug_message_callback),
        std::ptr::null(),
    ));
}

pub fn log_context_info() {
    let read = |name: GLenum| -> String {
        let ptr = gl_call!(gl::GetString(name));
        if ptr.is_null() {
            return String::from("?");
        }
        unsafe { CStr::from_ptr(ptr as *const _) }
            .to_string_lossy()
            .into_owned()
    };

    log::info!(
        "Version: {} Vendor: {} Renderer: {} GLSL: {}",
        read(gl::VERSION),
        read(gl::VENDOR),
        read(gl::RENDERER),
        read(gl::SHADING_LANGUAGE_VERSION),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_known_error_codes() {
        assert_eq!(error_name(gl::INVALID_VALUE), "INVALID_VALUE");
        assert_eq!(error_name(gl::OUT_OF_MEMORY), "OUT_OF_MEMORY");
        assert_eq!(error_name(0xdead), "UNKNOWN_ERROR");
    }
}
