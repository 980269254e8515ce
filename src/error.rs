use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to parse font: {0}")]
    Font(String),

    #[error("shader compilation failed:\n{0}")]
    ShaderCompile(String),

    #[error("shader program link failed:\n{0}")]
    ShaderLink(String),

    #[error("audio output unavailable: {0}")]
    AudioStream(#[from] rodio::StreamError),

    #[error("failed to decode audio {path}: {source}")]
    AudioDecode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to set up logging: {0}")]
    Log(String),

    #[error("window: {0}")]
    Window(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
