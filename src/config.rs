use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::font::rasterizer::DEFAULT_PIXEL_HEIGHT;

pub const DEFAULT_CONFIG_FILE: &str = "learn_opengl.toml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub assets: AssetConfig,
    pub font: FontConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub vsync: bool,
    pub clear_color: [f32; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 800,
            height: 600,
            title: String::from("LearnOpenGL"),
            vsync: true,
            clear_color: [0.2, 0.3, 0.3, 1.0],
        }
    }
}

/// Asset paths, relative to `dir` unless absolute.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    pub dir: PathBuf,
    pub font: PathBuf,
    pub charset: PathBuf,
    pub container: PathBuf,
    pub face: PathBuf,
    pub tile: PathBuf,
    pub sprite: PathBuf,
    pub mix_background: PathBuf,
    pub mix_frames: [PathBuf; 2],
    pub music: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        AssetConfig {
            dir: PathBuf::from("assets"),
            font: PathBuf::from("fonts/font.ttf"),
            charset: PathBuf::from("charset.txt"),
            container: PathBuf::from("img/container.png"),
            face: PathBuf::from("img/awesomeface.png"),
            tile: PathBuf::from("tile/tile.png"),
            sprite: PathBuf::from("img/bag3.png"),
            mix_background: PathBuf::from("img/bag2.png"),
            mix_frames: [PathBuf::from("img/bag0.png"), PathBuf::from("img/bag1.png")],
            music: PathBuf::from("audio/music.ogg"),
        }
    }
}

impl AssetConfig {
    pub fn path(&self, relative: &Path) -> PathBuf {
        self.dir.join(relative)
    }
}

/// Where the characters to rasterize come from.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CharsetSource {
    /// Codes 0 through 127
    Ascii,
    /// `assets.charset`
    #[default]
    File,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    pub pixel_height: f32,
    pub charset: CharsetSource,
}

impl Default for FontConfig {
    fn default() -> Self {
        FontConfig {
            pixel_height: DEFAULT_PIXEL_HEIGHT,
            charset: CharsetSource::File,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: String::from("info"),
            file: None,
        }
    }
}

impl AppConfig {
    /// The charset file to read, or `None` for the built-in ASCII set.
    pub fn charset_file(&self) -> Option<PathBuf> {
        match self.font.charset {
            CharsetSource::Ascii => None,
            CharsetSource::File => Some(self.assets.path(&self.assets.charset)),
        }
    }

    pub fn from_toml(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml(&text, path)
    }

    /// An explicit path must exist; otherwise the default file is used when
    /// present and built-in defaults when not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(AppConfig::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml("", Path::new("test.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.window.width, 800);
        assert_eq!(config.font.pixel_height, 48.0);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let text = r#"
            [window]
            width = 1024
            vsync = false

            [assets]
            dir = "/srv/assets"
            font = "fonts/STKAITI.TTF"

            [log]
            level = "debug"
            file = "logs/demo.log"
        "#;

        let config = AppConfig::from_toml(text, Path::new("test.toml")).unwrap();

        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
        assert!(!config.window.vsync);
        assert_eq!(
            config.assets.path(&config.assets.font),
            PathBuf::from("/srv/assets/fonts/STKAITI.TTF")
        );
        assert_eq!(config.assets.charset, PathBuf::from("charset.txt"));
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.file, Some(PathBuf::from("logs/demo.log")));
    }

    #[test]
    fn ascii_charset_needs_no_file() {
        let text = r#"
            [font]
            charset = "ascii"
            pixel_height = 32.0
        "#;

        let config = AppConfig::from_toml(text, Path::new("test.toml")).unwrap();

        assert_eq!(config.font.charset, CharsetSource::Ascii);
        assert_eq!(config.font.pixel_height, 32.0);
        assert_eq!(config.charset_file(), None);
        assert_eq!(
            AppConfig::default().charset_file(),
            Some(PathBuf::from("assets/charset.txt"))
        );
    }

    #[test]
    fn unknown_charset_source_is_rejected() {
        assert!(AppConfig::from_toml("[font]\ncharset = \"latin1\"", Path::new("test.toml")).is_err());
    }

    #[test]
    fn bad_types_are_reported_with_the_path() {
        let err = AppConfig::from_toml("[window]\nwidth = \"wide\"", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, Error::Config { ref path, .. } if path == Path::new("bad.toml")));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        assert!(AppConfig::load(Some(Path::new("/nonexistent/config.toml"))).is_err());
    }
}
