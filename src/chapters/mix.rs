use crate::app::{self, Chapter, ChapterContext, Frame};
use crate::error::Result;
use crate::gl_call;
use crate::renderer::{QuadProps, Renderer};
use crate::shader::ShaderProgram;
use crate::texture::Texture;

use super::screen_projection;

/// Space kept free at the right and top of the window.
const MARGIN: (f32, f32) = (144.0, 44.0);

const TICK_SECONDS: f32 = 0.1;

/// Counts 0.1 steps, one every 100 ms of frame time.
///
/// The blend factor is the fractional part of the count; the overlay
/// switches image every whole unit.
#[derive(Debug, Default)]
pub struct MixClock {
    ticks: u64,
    pending: f32,
}

impl MixClock {
    pub fn advance(&mut self, dt: f32) {
        self.pending += dt.max(0.0);
        while self.pending >= TICK_SECONDS {
            self.pending -= TICK_SECONDS;
            self.ticks += 1;
        }
    }

    pub fn mix_value(&self) -> f32 {
        (self.ticks % 10) as f32 / 10.0
    }

    pub fn frame(&self) -> usize {
        (self.ticks / 10 % 2) as usize
    }
}

fn mix_quad(width: f32, height: f32) -> QuadProps {
    QuadProps::new(
        (0.0, 0.0),
        ((width - MARGIN.0).max(0.0), (height - MARGIN.1).max(0.0)),
    )
}

/// A background blended with an overlay that fades in and swaps image.
pub struct MixChapter {
    program: ShaderProgram,
    renderer: Renderer,
    background: Texture,
    frames: [Texture; 2],
    clock: MixClock,
    quad: QuadProps,
}

impl MixChapter {
    fn set_viewport(&mut self, width: f32, height: f32) {
        self.quad = mix_quad(width, height);
        if let Some(projection) = screen_projection(width, height) {
            self.program.use_program();
            self.program.set_uniform_matrix4fv("projection", &projection);
        }
    }
}

impl Chapter for MixChapter {
    const TITLE: &'static str = "Mixing Textures";

    fn load(ctx: &ChapterContext) -> Result<Self> {
        let assets = &ctx.config.assets;
        let program = ShaderProgram::from_sources(
            include_str!("../shaders/sprite.vert"),
            include_str!("../shaders/mix.frag"),
        )?;
        super::bind_sampler_units(&program);
        let [first, second] = &assets.mix_frames;

        gl_call!(gl::ClearColor(0.1, 0.1, 0.1, 1.0));
        app::enable_alpha_blending();

        let mut chapter = MixChapter {
            program,
            renderer: Renderer::new(1),
            background: Texture::from_file(assets.path(&assets.mix_background))?,
            frames: [
                Texture::from_file(assets.path(first))?,
                Texture::from_file(assets.path(second))?,
            ],
            clock: MixClock::default(),
            quad: mix_quad(ctx.width as f32, ctx.height as f32),
        };
        chapter.set_viewport(ctx.width as f32, ctx.height as f32);
        Ok(chapter)
    }

    fn update(&mut self, _window: &mut glfw::Window, dt: f32) {
        self.clock.advance(dt);
    }

    fn render(&mut self, _frame: &Frame) {
        self.program.use_program();
        self.program.set_uniform_1f("mixVal", self.clock.mix_value());

        self.renderer.begin_batch();
        self.renderer.submit_quad(self.quad);
        self.renderer.end_batch(&[&self.background, &self.frames[self.clock.frame()]]);
    }

    fn resize(&mut self, width: i32, height: i32) {
        self.set_viewport(width as f32, height as f32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_every_hundred_milliseconds() {
        let mut clock = MixClock::default();
        assert_eq!(clock.mix_value(), 0.0);

        clock.advance(0.05);
        assert_eq!(clock.mix_value(), 0.0);
        clock.advance(0.05);
        clock.advance(0.001);
        assert_eq!(clock.mix_value(), 0.1);

        clock.advance(0.35);
        assert_eq!(clock.mix_value(), 0.4);
    }

    #[test]
    fn overlay_alternates_each_full_fade() {
        let mut clock = MixClock::default();
        let mut frames = Vec::new();
        for _ in 0..30 {
            frames.push(clock.frame());
            clock.advance(0.101);
        }
        assert_eq!(&frames[..10], &[0; 10]);
        assert_eq!(&frames[10..20], &[1; 10]);
        assert_eq!(&frames[20..], &[0; 10]);
    }

    #[test]
    fn quad_leaves_the_margin_free() {
        let quad = mix_quad(800.0, 600.0);
        assert_eq!(quad.position, (0.0, 0.0));
        assert_eq!(quad.size, (656.0, 556.0));
        assert_eq!(mix_quad(100.0, 20.0).size, (0.0, 0.0));
    }
}
