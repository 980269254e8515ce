use std::time::{SystemTime, UNIX_EPOCH};

use crate::app::{Chapter, ChapterContext, Frame};
use crate::error::Result;
use crate::mesh::Mesh;
use crate::shader::ShaderProgram;

#[rustfmt::skip]
const TRIANGLE: [f32; 9] = [
    -0.5, -0.5, 0.0, // bottom left
     0.5, -0.5, 0.0, // bottom right
     0.0,  0.5, 0.0, // top
];

#[rustfmt::skip]
const RECTANGLE: [f32; 12] = [
     0.5,  0.5, 0.0, // top right
     0.5, -0.5, 0.0, // bottom right
    -0.5, -0.5, 0.0, // bottom left
    -0.5,  0.5, 0.0, // top left
];

const RECTANGLE_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// The triangle shows during the second half of every ten seconds.
pub fn shows_triangle(seconds: u64) -> bool {
    seconds % 60 % 10 > 5
}

pub struct TriangleChapter {
    program: ShaderProgram,
    triangle: Mesh,
    rectangle: Mesh,
}

impl Chapter for TriangleChapter {
    const TITLE: &'static str = "Hello Triangle";

    fn load(_ctx: &ChapterContext) -> Result<Self> {
        let program = ShaderProgram::from_sources(
            include_str!("../shaders/triangle.vert"),
            include_str!("../shaders/triangle.frag"),
        )?;

        Ok(TriangleChapter {
            program,
            triangle: Mesh::new(&TRIANGLE, &[3], None),
            rectangle: Mesh::new(&RECTANGLE, &[3], Some(&RECTANGLE_INDICES)),
        })
    }

    fn render(&mut self, _frame: &Frame) {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());

        self.program.use_program();
        if shows_triangle(seconds) {
            self.triangle.draw();
        } else {
            self.rectangle.draw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switches_every_five_seconds() {
        let shown: Vec<bool> = (0..10).map(shows_triangle).collect();
        assert_eq!(shown, [false, false, false, false, false, false, true, true, true, true]);
        assert!(shows_triangle(1_700_000_006));
        assert!(!shows_triangle(1_700_000_005));
    }
}
