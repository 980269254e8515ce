use nalgebra_glm as glm;

pub const SPEED: f32 = 1.5;
pub const SENSITIVITY: f32 = 0.2;

const PITCH_LIMIT: f32 = 89.0;
const FOV_MIN: f32 = 1.0;
const FOV_MAX: f32 = 90.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Free-fly camera. Angles are kept in degrees.
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: glm::Vec3,
    pub aspect_ratio: f32,
    front: glm::Vec3,
    up: glm::Vec3,
    right: glm::Vec3,
    // Rotation around X
    pitch: f32,
    // Rotation around Y; -90 so that the camera starts facing -Z
    yaw: f32,
    fov: f32,
}

impl Camera {
    pub fn new(position: glm::Vec3, aspect_ratio: f32) -> Self {
        let mut camera = Camera {
            position,
            aspect_ratio,
            front: glm::vec3(0.0, 0.0, -1.0),
            up: glm::vec3(0.0, 1.0, 0.0),
            right: glm::vec3(1.0, 0.0, 0.0),
            pitch: 0.0,
            yaw: -90.0,
            fov: 45.0,
        };
        camera.update_vectors();
        camera
    }

    // Looking straight up or down flips the view, so stop just short of it
    pub fn set_pitch(&mut self, degrees: f32) {
        self.pitch = degrees.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn set_fov(&mut self, degrees: f32) {
        self.fov = degrees.clamp(FOV_MIN, FOV_MAX);
    }

    pub fn view_matrix(&self) -> glm::Mat4 {
        glm::look_at(&self.position, &(self.position + self.front), &self.up)
    }

    pub fn projection_matrix(&self) -> glm::Mat4 {
        glm::perspective(self.aspect_ratio, self.fov.to_radians(), 0.01, 100.0)
    }

    pub fn process_movement(&mut self, movement: Movement, dt: f32) {
        let step = SPEED * dt;
        match movement {
            Movement::Forward => self.position += self.front * step,
            Movement::Backward => self.position -= self.front * step,
            Movement::Left => self.position -= self.right * step,
            Movement::Right => self.position += self.right * step,
            Movement::Up => self.position += self.up * step,
            Movement::Down => self.position -= self.up * step,
        }
    }

    /// Cursor deltas in screen pixels; screen y grows downwards, hence the flip.
    pub fn process_mouse(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * SENSITIVITY;
        self.set_pitch(self.pitch - dy * SENSITIVITY);
    }

    pub fn zoom(&mut self, scroll: f32) {
        self.set_fov(self.fov - scroll);
    }

    fn update_vectors(&mut self) {
        let pitch = self.pitch.to_radians();
        let yaw = self.yaw.to_radians();

        self.front = glm::normalize(&glm::vec3(
            pitch.cos() * yaw.cos(),
            pitch.sin(),
            pitch.cos() * yaw.sin(),
        ));
        self.right = glm::normalize(&glm::cross(&self.front, &glm::vec3(0.0, 1.0, 0.0)));
        self.up = glm::normalize(&glm::cross(&self.right, &self.front));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: glm::Vec3, b: glm::Vec3) -> bool {
        (a - b).norm() < 1e-5
    }

    #[test]
    fn starts_looking_down_negative_z() {
        let camera = Camera::new(glm::vec3(0.0, 0.0, 3.0), 4.0 / 3.0);

        assert!(close(camera.front, glm::vec3(0.0, 0.0, -1.0)));
        assert!(close(camera.right, glm::vec3(1.0, 0.0, 0.0)));
        assert!(close(camera.up, glm::vec3(0.0, 1.0, 0.0)));
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::new(glm::Vec3::zeros(), 1.0);

        camera.set_pitch(120.0);
        assert_eq!(camera.pitch, 89.0);
        camera.set_pitch(-400.0);
        assert_eq!(camera.pitch, -89.0);
    }

    #[test]
    fn fov_is_clamped_when_zooming() {
        let mut camera = Camera::new(glm::Vec3::zeros(), 1.0);

        camera.zoom(100.0);
        assert_eq!(camera.fov(), 1.0);
        camera.zoom(-500.0);
        assert_eq!(camera.fov(), 90.0);
    }

    #[test]
    fn moving_forward_follows_front() {
        let mut camera = Camera::new(glm::vec3(0.0, 0.0, 3.0), 1.0);

        camera.process_movement(Movement::Forward, 2.0);
        assert!(close(camera.position, glm::vec3(0.0, 0.0, 0.0)));

        camera.process_movement(Movement::Right, 1.0);
        camera.process_movement(Movement::Up, 1.0);
        assert!(close(camera.position, glm::vec3(1.5, 1.5, 0.0)));
    }

    #[test]
    fn mouse_up_pitches_up() {
        let mut camera = Camera::new(glm::Vec3::zeros(), 1.0);

        // moving the cursor up gives a negative screen delta
        camera.process_mouse(50.0, -100.0);

        assert!((camera.pitch - 20.0).abs() < 1e-4);
        assert!((camera.yaw + 80.0).abs() < 1e-4);
        assert!(camera.front.y > 0.0);
    }

    #[test]
    fn view_matrix_moves_world_opposite_to_camera() {
        let camera = Camera::new(glm::vec3(0.0, 0.0, 3.0), 1.0);

        let origin = camera.view_matrix() * glm::vec4(0.0, 0.0, 0.0, 1.0);
        assert!((origin.z + 3.0).abs() < 1e-5);
    }
}
