use crate::app::{Chapter, ChapterContext, Frame};
use crate::error::Result;

/// Just the window and its clear colour.
pub struct WindowChapter;

impl Chapter for WindowChapter {
    const TITLE: &'static str = "Hello Window";

    fn load(_ctx: &ChapterContext) -> Result<Self> {
        Ok(WindowChapter)
    }

    fn render(&mut self, _frame: &Frame) {}
}
