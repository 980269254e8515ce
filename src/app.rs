use glfw::{Action, Context, Key, WindowEvent};

use crate::config::AppConfig;
use crate::debugging;
use crate::error::{Error, Result};
use crate::gl_call;

/// What a chapter gets to build its GL objects with.
pub struct ChapterContext<'a> {
    pub config: &'a AppConfig,
    pub width: u32,
    pub height: u32,
}

pub struct Frame {
    pub fps: f64,
}

/// One demo. `load` runs once the GL context is current; everything the
/// chapter owns is dropped before the window goes away.
pub trait Chapter: Sized {
    const TITLE: &'static str;

    fn load(ctx: &ChapterContext) -> Result<Self>;

    fn handle_event(&mut self, _event: &WindowEvent) {}

    fn update(&mut self, _window: &mut glfw::Window, _dt: f32) {}

    fn render(&mut self, frame: &Frame);

    fn resize(&mut self, _width: i32, _height: i32) {}
}

#[derive(Default)]

// To check framerate
pub struct Framerate{
    pub frame_count: u32,
    pub last_frame_time: f64,
    pub fps: f64,
}

impl Framerate{
    // Returns the new average once a second has passed
    pub fn run(&mut self, current_time: f64) -> Option<f64>{
        self.frame_count += 1;

        let delta = current_time - self.last_frame_time;

        if delta >= 1.0{
            self.last_frame_time = current_time;
            self.fps = f64::from(self.frame_count) / delta;
            self.frame_count = 0;
            return Some(self.fps);
        }
        None
    }
}

pub fn run<C: Chapter>(config: &AppConfig) -> Result<()> {
    let mut glfw = glfw::init(glfw::FAIL_ON_ERRORS).map_err(|e| Error::Window(format!("{:?}", e)))?; // Init glfw
    glfw.window_hint(glfw::WindowHint::ContextVersion(4, 6)); // OpenGL version 4.6 // major 4, minor 6
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
        glfw::OpenGlProfileHint::Core,
    )); // OpenGL core profile
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true)); // needed on macOS
    glfw.window_hint(glfw::WindowHint::OpenGlDebugContext(true));

    let title = format!("{} - {}", config.window.title, C::TITLE);

    let (mut window, events) = glfw
        .create_window(
            config.window.width,
            config.window.height,
            &title,
            glfw::WindowMode::Windowed,
        )
        .ok_or_else(|| Error::Window(String::from("failed to create GLFW window")))?;

    // Make the window's context current
    // OpenGL is a state machine, the context holds that state
    window.make_current();
    window.set_key_polling(true);
    window.set_framebuffer_size_polling(true);
    window.set_scroll_polling(true);

    gl::load_with(|symbol| window.get_proc_address(symbol) as *const _); // Load OpenGL function pointers
    glfw.set_swap_interval(if config.window.vsync {
        glfw::SwapInterval::Sync(1)
    } else {
        glfw::SwapInterval::None
    });

    debugging::enable_debug_output();
    debugging::log_context_info();

    let (width, height) = window.get_framebuffer_size();
    gl_call!(gl::Viewport(0, 0, width, height));
    let [r, g, b, a] = config.window.clear_color;
    gl_call!(gl::ClearColor(r, g, b, a)); // RGBA

    let ctx = ChapterContext {
        config,
        width: width as u32,
        height: height as u32,
    };
    // Declared after the window so it is dropped while the context is still alive
    let mut chapter = C::load(&ctx)?;
    log::info!("chapter `{}` loaded", C::TITLE);

    let mut framerate = Framerate::default();
    let mut last_time = glfw.get_time();

    while !window.should_close() {
        // Poll and process events
        glfw.poll_events();

        for (_, event) in glfw::flush_messages(&events) {
            match event {
                WindowEvent::Key(Key::Escape, _, Action::Press, _) => window.set_should_close(true),
                WindowEvent::FramebufferSize(width, height) => {
                    gl_call!(gl::Viewport(0, 0, width, height));
                    // minimized; keep the last projection until there is something to draw into
                    if !is_minimized(width, height) {
                        chapter.resize(width, height);
                    }
                }
                _ => {}
            }
            chapter.handle_event(&event);
        }

        let now = glfw.get_time();
        let dt = (now - last_time) as f32;
        last_time = now;

        chapter.update(&mut window, dt);

        gl_call!(gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT));
        chapter.render(&Frame { fps: framerate.fps });

        // double buffering : front buffer, back buffer
        window.swap_buffers();

        if let Some(fps) = framerate.run(now) {
            window.set_title(&format!("{} : FPS - {:.0}", title, fps));
        }
    }

    Ok(())
}

pub fn is_minimized(width: i32, height: i32) -> bool {
    width <= 0 || height <= 0
}

/// Standard alpha blending, needed by anything with transparent texels.
pub fn enable_alpha_blending() {
    gl_call!(gl::Enable(gl::BLEND));
    gl_call!(gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_framebuffer_is_minimized() {
        assert!(is_minimized(0, 0));
        assert!(is_minimized(800, 0));
        assert!(!is_minimized(800, 600));
    }

    #[test]
    fn reports_once_per_second() {
        let mut framerate = Framerate::default();

        for i in 1..60 {
            assert_eq!(framerate.run(f64::from(i) / 60.0), None);
        }
        assert_eq!(framerate.run(1.0), Some(60.0));
        assert_eq!(framerate.frame_count, 0);
        assert_eq!(framerate.fps, 60.0);

        assert_eq!(framerate.run(1.5), None);
        assert_eq!(framerate.run(2.0), Some(2.0));
    }
}
