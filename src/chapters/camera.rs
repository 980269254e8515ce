use glfw::{Action, CursorMode, Key, WindowEvent};
use nalgebra_glm as glm;

use crate::app::{Chapter, ChapterContext, Frame};
use crate::camera::{Camera, Movement};
use crate::error::Result;
use crate::gl_call;
use crate::mesh::Mesh;
use crate::shader::ShaderProgram;
use crate::texture::Texture;

// (x, y, z, u, v)
#[rustfmt::skip]
const QUAD: [f32; 20] = [
     0.5,  0.5, 0.0, 1.0, 1.0,
     0.5, -0.5, 0.0, 1.0, 0.0,
    -0.5, -0.5, 0.0, 0.0, 0.0,
    -0.5,  0.5, 0.0, 0.0, 1.0,
];

const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

const QUAD_TILT_DEGREES: [f32; 3] = [0.0, 15.0, 30.0];

const FLY_KEYS: [Key; 6] = [Key::W, Key::S, Key::A, Key::D, Key::Space, Key::LeftShift];

pub fn movement_for(key: Key) -> Option<Movement> {
    match key {
        Key::W => Some(Movement::Forward),
        Key::S => Some(Movement::Backward),
        Key::A => Some(Movement::Left),
        Key::D => Some(Movement::Right),
        Key::Space => Some(Movement::Up),
        Key::LeftShift => Some(Movement::Down),
        _ => None,
    }
}

pub fn quad_model(tilt_degrees: f32) -> glm::Mat4 {
    glm::rotate_x(&glm::Mat4::identity(), tilt_degrees.to_radians())
}

/// Tracks the cursor between frames; the first sample only sets the origin.
#[derive(Default)]
pub struct MouseTracker {
    last: Option<(f64, f64)>,
}

impl MouseTracker {
    pub fn delta(&mut self, x: f64, y: f64) -> (f32, f32) {
        let delta = match self.last {
            Some((last_x, last_y)) => ((x - last_x) as f32, (y - last_y) as f32),
            None => (0.0, 0.0),
        };
        self.last = Some((x, y));
        delta
    }
}

/// Three tilted quads and a free-fly camera.
pub struct CameraChapter {
    program: ShaderProgram,
    quad: Mesh,
    container: Texture,
    face: Texture,
    camera: Camera,
    mouse: MouseTracker,
    cursor_grabbed: bool,
}

impl Chapter for CameraChapter {
    const TITLE: &'static str = "Camera";

    fn load(ctx: &ChapterContext) -> Result<Self> {
        let assets = &ctx.config.assets;
        let program = ShaderProgram::from_sources(
            include_str!("../shaders/camera.vert"),
            include_str!("../shaders/textures.frag"),
        )?;
        super::bind_sampler_units(&program);

        gl_call!(gl::Enable(gl::DEPTH_TEST));

        Ok(CameraChapter {
            program,
            quad: Mesh::new(&QUAD, &[3, 2], Some(&QUAD_INDICES)),
            container: Texture::from_file(assets.path(&assets.container))?,
            face: Texture::from_file(assets.path(&assets.face))?,
            camera: Camera::new(glm::vec3(0.0, 0.0, 3.0), ctx.width as f32 / ctx.height.max(1) as f32),
            mouse: MouseTracker::default(),
            cursor_grabbed: false,
        })
    }

    fn handle_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::Scroll(_, y) = event {
            self.camera.zoom(*y as f32);
            log::debug!("fov {:.0}", self.camera.fov());
        }
    }

    fn update(&mut self, window: &mut glfw::Window, dt: f32) {
        if !self.cursor_grabbed {
            window.set_cursor_mode(CursorMode::Disabled);
            self.cursor_grabbed = true;
        }

        for key in FLY_KEYS {
            if window.get_key(key) != Action::Press {
                continue;
            }
            if let Some(movement) = movement_for(key) {
                self.camera.process_movement(movement, dt);
            }
        }

        let (x, y) = window.get_cursor_pos();
        let (dx, dy) = self.mouse.delta(x, y);
        self.camera.process_mouse(dx, dy);
    }

    fn render(&mut self, _frame: &Frame) {
        self.program.use_program();
        self.program.set_uniform_matrix4fv("view", &self.camera.view_matrix());
        self.program.set_uniform_matrix4fv("projection", &self.camera.projection_matrix());
        self.container.bind(0);
        self.face.bind(1);

        for tilt in QUAD_TILT_DEGREES {
            self.program.set_uniform_matrix4fv("model", &quad_model(tilt));
            self.quad.draw();
        }
    }

    fn resize(&mut self, width: i32, height: i32) {
        if height > 0 {
            self.camera.aspect_ratio = width as f32 / height as f32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fly_key_moves_the_camera() {
        let movements: Vec<_> = FLY_KEYS.iter().filter_map(|&key| movement_for(key)).collect();
        assert_eq!(movements.len(), FLY_KEYS.len());
    }

    #[test]
    fn maps_fly_keys() {
        assert_eq!(movement_for(Key::W), Some(Movement::Forward));
        assert_eq!(movement_for(Key::LeftShift), Some(Movement::Down));
        assert_eq!(movement_for(Key::Q), None);
    }

    #[test]
    fn first_cursor_sample_does_not_move_the_camera() {
        let mut mouse = MouseTracker::default();
        assert_eq!(mouse.delta(400.0, 300.0), (0.0, 0.0));
        assert_eq!(mouse.delta(410.0, 295.0), (10.0, -5.0));
    }

    #[test]
    fn untilted_quad_keeps_its_vertices() {
        assert_eq!(quad_model(0.0), glm::Mat4::identity());

        let tilted = quad_model(90.0) * glm::vec4(0.0, 1.0, 0.0, 1.0);
        assert!(tilted.y.abs() < 1e-6);
        assert!((tilted.z - 1.0).abs() < 1e-6);
    }
}
