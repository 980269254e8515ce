use nalgebra_glm as glm;

use crate::app::{self, Chapter, ChapterContext, Frame};
use crate::error::Result;
use crate::font::FontManager;
use crate::gl_call;

const COPYRIGHT: &str = "(C) LearnOpenGL.com";
const COPYRIGHT_SCALE: f32 = 0.5;
// distance from the right edge and from the top edge to the baseline
const COPYRIGHT_MARGIN: (f32, f32) = (25.0, 30.0);

/// Baseline origin that puts a line of `text_width` in the top right corner.
pub fn top_right(viewport: (f32, f32), text_width: f32) -> (f32, f32) {
    (
        (viewport.0 - text_width - COPYRIGHT_MARGIN.0).max(0.0),
        viewport.1 - COPYRIGHT_MARGIN.1,
    )
}

pub struct TextChapter {
    font: FontManager,
    viewport: (f32, f32),
}

impl Chapter for TextChapter {
    const TITLE: &'static str = "Text Rendering";

    fn load(ctx: &ChapterContext) -> Result<Self> {
        let viewport = (ctx.width as f32, ctx.height as f32);

        gl_call!(gl::ClearColor(0.9, 0.9, 0.9, 1.0));
        app::enable_alpha_blending();

        let font = FontManager::from_config(viewport.0, viewport.1, ctx.config);
        if !font.is_enabled() {
            log::warn!("no font loaded, nothing to show");
        }

        Ok(TextChapter { font, viewport })
    }

    fn render(&mut self, frame: &Frame) {
        self.font.print_text(
            &format!("{:.0}FPS,我是谁？", frame.fps),
            0.0,
            self.viewport.1 - 48.0,
            1.0,
            glm::vec3(0.8, 0.2, 0.1),
        );
        self.font.print_text("This is sample text", 25.0, 25.0, 1.0, glm::vec3(0.5, 0.8, 0.2));

        let (x, y) = top_right(self.viewport, self.font.measure(COPYRIGHT, COPYRIGHT_SCALE));
        self.font.print_text(COPYRIGHT, x, y, COPYRIGHT_SCALE, glm::vec3(0.3, 0.7, 0.9));
    }

    fn resize(&mut self, width: i32, height: i32) {
        self.viewport = (width as f32, height as f32);
        self.font.resize(width as f32, height as f32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copyright_follows_the_top_right_corner() {
        assert_eq!(top_right((800.0, 600.0), 235.0), (540.0, 570.0));
        assert_eq!(top_right((1024.0, 768.0), 235.0), (764.0, 738.0));
    }

    #[test]
    fn wide_text_is_pinned_to_the_left_edge() {
        assert_eq!(top_right((100.0, 50.0), 400.0), (0.0, 20.0));
    }
}
