use crate::app::{self, Chapter, ChapterContext, Frame};
use crate::error::Result;
use crate::renderer::{tile_grid, Renderer};
use crate::shader::ShaderProgram;
use crate::texture::Texture;

use super::screen_projection;

// one draw call covers a 1080p screen of 64 px tiles
const BATCH_CAPACITY: usize = 1024;

/// One texture repeated over the whole viewport, submitted as a single batch.
pub struct TilesChapter {
    program: ShaderProgram,
    renderer: Renderer,
    tile: Texture,
    viewport: (u32, u32),
}

impl TilesChapter {
    fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        if let Some(projection) = screen_projection(width as f32, height as f32) {
            self.program.use_program();
            self.program.set_uniform_matrix4fv("projection", &projection);
        }
    }
}

impl Chapter for TilesChapter {
    const TITLE: &'static str = "Tiles";

    fn load(ctx: &ChapterContext) -> Result<Self> {
        let assets = &ctx.config.assets;
        let program = ShaderProgram::from_sources(
            include_str!("../shaders/sprite.vert"),
            include_str!("../shaders/sprite.frag"),
        )?;
        let tile = Texture::from_file(assets.path(&assets.tile))?;
        log::debug!("tile {}x{}", tile.width, tile.height);

        app::enable_alpha_blending();

        let mut chapter = TilesChapter {
            program,
            renderer: Renderer::new(BATCH_CAPACITY),
            tile,
            viewport: (0, 0),
        };
        chapter.set_viewport(ctx.width, ctx.height);
        Ok(chapter)
    }

    fn render(&mut self, _frame: &Frame) {
        self.program.use_program();

        self.renderer.begin_batch();
        for quad in tile_grid(self.viewport, (self.tile.width, self.tile.height)) {
            self.renderer.submit_quad(quad);
        }
        self.renderer.end_batch(&[&self.tile]);
    }

    fn resize(&mut self, width: i32, height: i32) {
        self.set_viewport(width.max(0) as u32, height.max(0) as u32);
    }
}
