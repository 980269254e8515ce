use glfw::{Action, Key, WindowEvent};
use nalgebra_glm as glm;

use crate::app::{self, Chapter, ChapterContext, Frame};
use crate::audio::AudioPlayer;
use crate::error::Result;
use crate::font::FontManager;

pub fn status_line(player: Option<&AudioPlayer>) -> String {
    match player {
        None => String::from("No audio device"),
        Some(player) => format!(
            "{}  volume {:.0}%",
            if player.is_paused() { "Paused" } else { "Playing" },
            player.volume() * 100.0
        ),
    }
}

/// Background music with keyboard volume and pause.
pub struct AudioChapter {
    player: Option<AudioPlayer>,
    font: FontManager,
    height: f32,
}

impl Chapter for AudioChapter {
    const TITLE: &'static str = "Audio";

    fn load(ctx: &ChapterContext) -> Result<Self> {
        let assets = &ctx.config.assets;

        let player = match AudioPlayer::new() {
            Ok(mut player) => {
                if let Err(e) = player.play(assets.path(&assets.music), true) {
                    log::error!("{}", e);
                }
                Some(player)
            }
            Err(e) => {
                log::warn!("{}, continuing without sound", e);
                None
            }
        };

        app::enable_alpha_blending();
        let font = FontManager::from_config(ctx.width as f32, ctx.height as f32, ctx.config);

        Ok(AudioChapter { player, font, height: ctx.height as f32 })
    }

    fn handle_event(&mut self, event: &WindowEvent) {
        let Some(player) = &mut self.player else {
            return;
        };
        if let WindowEvent::Key(key, _, Action::Press | Action::Repeat, _) = event {
            match key {
                Key::Up => player.volume_up(),
                Key::Down => player.volume_down(),
                Key::P => player.toggle_pause(),
                _ => return,
            }
            log::debug!("{}", status_line(Some(player)));
        }
    }

    fn render(&mut self, _frame: &Frame) {
        let color = glm::vec3(0.9, 0.9, 0.9);
        self.font.print_text(&status_line(self.player.as_ref()), 25.0, self.height - 60.0, 0.75, color);
        self.font.print_text("Up/Down: volume   P: pause", 25.0, 25.0, 0.5, color);
    }

    fn resize(&mut self, width: i32, height: i32) {
        self.height = height as f32;
        self.font.resize(width as f32, height as f32);
    }
}

impl Drop for AudioChapter {
    fn drop(&mut self) {
        if let Some(player) = &mut self.player {
            player.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_missing_device() {
        assert_eq!(status_line(None), "No audio device");
    }
}
