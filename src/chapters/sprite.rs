use std::rc::Rc;

use glfw::{Action, Key};

use crate::app::{self, Chapter, ChapterContext, Frame};
use crate::error::Result;
use crate::shader::ShaderProgram;
use crate::sprite::Sprite;

use super::screen_projection;

pub const STEP_PIXELS: i32 = 10;

pub fn step_for(key: Key) -> Option<(i32, i32)> {
    match key {
        Key::W => Some((0, STEP_PIXELS)),
        Key::S => Some((0, -STEP_PIXELS)),
        Key::A => Some((-STEP_PIXELS, 0)),
        Key::D => Some((STEP_PIXELS, 0)),
        _ => None,
    }
}

/// An image walked around the window with WASD.
pub struct SpriteChapter {
    program: Rc<ShaderProgram>,
    sprite: Sprite,
}

impl SpriteChapter {
    fn set_projection(&self, width: f32, height: f32) {
        if let Some(projection) = screen_projection(width, height) {
            self.program.use_program();
            self.program.set_uniform_matrix4fv("projection", &projection);
        }
    }
}

impl Chapter for SpriteChapter {
    const TITLE: &'static str = "Sprite";

    fn load(ctx: &ChapterContext) -> Result<Self> {
        let assets = &ctx.config.assets;
        let program = Rc::new(ShaderProgram::from_sources(
            include_str!("../shaders/sprite.vert"),
            include_str!("../shaders/sprite.frag"),
        )?);
        let sprite = Sprite::load(assets.path(&assets.sprite), Rc::clone(&program))?;

        app::enable_alpha_blending();

        let chapter = SpriteChapter { program, sprite };
        chapter.set_projection(ctx.width as f32, ctx.height as f32);
        Ok(chapter)
    }

    fn update(&mut self, window: &mut glfw::Window, _dt: f32) {
        for key in [Key::W, Key::S, Key::A, Key::D] {
            if window.get_key(key) != Action::Press {
                continue;
            }
            if let Some((dx, dy)) = step_for(key) {
                self.sprite.move_by(dx, dy);
            }
        }
    }

    fn render(&mut self, _frame: &Frame) {
        self.sprite.draw();
    }

    fn resize(&mut self, width: i32, height: i32) {
        self.set_projection(width as f32, height as f32);
    }
}
