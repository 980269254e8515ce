//! Audio playback through rodio's default output device.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::error::{Error, Result};

pub const MAX_VOLUME: f32 = 2.0;
pub const VOLUME_STEP: f32 = 0.1;

pub fn clamp_volume(volume: f32) -> f32 {
    volume.clamp(0.0, MAX_VOLUME)
}

pub struct AudioPlayer {
    // Dropping the stream stops all output
    stream: OutputStream,
    sinks: Vec<Sink>,
    volume: f32,
}

impl AudioPlayer {
    pub fn new() -> Result<Self> {
        let stream = OutputStreamBuilder::open_default_stream()?;
        log::info!("audio output opened");

        Ok(AudioPlayer {
            stream,
            sinks: Vec::new(),
            volume: 1.0,
        })
    }

    /// Starts playing `path` alongside anything already playing.
    pub fn play(&mut self, path: impl AsRef<Path>, looped: bool) -> Result<()> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let source = Decoder::new(BufReader::new(file)).map_err(|source| Error::AudioDecode {
            path: path.to_path_buf(),
            source,
        })?;

        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volume);
        if looped {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }

        log::info!("playing {}{}", path.display(), if looped { " (looped)" } else { "" });

        self.sinks.retain(|s| !s.empty());
        self.sinks.push(sink);
        Ok(())
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_volume(volume);
        for sink in &self.sinks {
            sink.set_volume(self.volume);
        }
    }

    pub fn volume_up(&mut self) {
        self.set_volume(self.volume + VOLUME_STEP);
    }

    pub fn volume_down(&mut self) {
        self.set_volume(self.volume - VOLUME_STEP);
    }

    pub fn is_paused(&self) -> bool {
        self.sinks.iter().all(|s| s.is_paused())
    }

    pub fn toggle_pause(&mut self) {
        let resume = self.is_paused();
        for sink in &self.sinks {
            if resume {
                sink.play();
            } else {
                sink.pause();
            }
        }
    }

    pub fn stop(&mut self) {
        for sink in self.sinks.drain(..) {
            sink.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_stays_in_range() {
        assert_eq!(clamp_volume(-0.5), 0.0);
        assert_eq!(clamp_volume(1.3), 1.3);
        assert_eq!(clamp_volume(7.0), MAX_VOLUME);
    }
}
