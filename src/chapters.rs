//! The demos, one per tutorial chapter. Each one is a [`Chapter`] run by
//! [`app::run`].

pub mod audio;
pub mod camera;
pub mod mix;
pub mod sprite;
pub mod text;
pub mod textures;
pub mod tiles;
pub mod triangle;
pub mod window;

use clap::ValueEnum;
use nalgebra_glm as glm;

use crate::app::{self, Chapter};
use crate::config::AppConfig;
use crate::error::Result;
use crate::shader::{ortho_2d, ShaderProgram};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ChapterName {
    Window,
    Triangle,
    Textures,
    Camera,
    Text,
    Tiles,
    Sprite,
    Mix,
    Audio,
}

impl ChapterName {
    pub fn run(self, config: &AppConfig) -> Result<()> {
        match self {
            ChapterName::Window => app::run::<window::WindowChapter>(config),
            ChapterName::Triangle => app::run::<triangle::TriangleChapter>(config),
            ChapterName::Textures => app::run::<textures::TexturesChapter>(config),
            ChapterName::Camera => app::run::<camera::CameraChapter>(config),
            ChapterName::Text => app::run::<text::TextChapter>(config),
            ChapterName::Tiles => app::run::<tiles::TilesChapter>(config),
            ChapterName::Sprite => app::run::<sprite::SpriteChapter>(config),
            ChapterName::Mix => app::run::<mix::MixChapter>(config),
            ChapterName::Audio => app::run::<audio::AudioChapter>(config),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChapterName::Window => window::WindowChapter::TITLE,
            ChapterName::Triangle => triangle::TriangleChapter::TITLE,
            ChapterName::Textures => textures::TexturesChapter::TITLE,
            ChapterName::Camera => camera::CameraChapter::TITLE,
            ChapterName::Text => text::TextChapter::TITLE,
            ChapterName::Tiles => tiles::TilesChapter::TITLE,
            ChapterName::Sprite => sprite::SpriteChapter::TITLE,
            ChapterName::Mix => mix::MixChapter::TITLE,
            ChapterName::Audio => audio::AudioChapter::TITLE,
        }
    }
}

/// Points the `texture0` and `texture1` samplers at units 0 and 1.
pub(crate) fn bind_sampler_units(program: &ShaderProgram) {
    program.set_uniform_1i("texture0", 0);
    program.set_uniform_1i("texture1", 1);
}

/// Pixel projection with the origin at the bottom left, `None` for an empty viewport.
pub(crate) fn screen_projection(width: f32, height: f32) -> Option<glm::Mat4> {
    (width > 0.0 && height > 0.0).then(|| ortho_2d(0.0, width, 0.0, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapter_names_parse_from_the_command_line() {
        assert_eq!(ChapterName::from_str("tiles", true), Ok(ChapterName::Tiles));
        assert_eq!(ChapterName::from_str("Audio", true), Ok(ChapterName::Audio));
        assert!(ChapterName::from_str("chunks", true).is_err());
    }

    #[test]
    fn empty_viewport_has_no_projection() {
        assert!(screen_projection(0.0, 0.0).is_none());
        assert!(screen_projection(800.0, 0.0).is_none());

        let projection = screen_projection(800.0, 600.0).unwrap();
        assert!(projection.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn every_chapter_has_a_distinct_title() {
        let mut titles: Vec<_> = ChapterName::value_variants().iter().map(|c| c.title()).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), ChapterName::value_variants().len());
    }
}
