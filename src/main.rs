pub mod app;
pub mod audio;
pub mod camera;
pub mod chapters;
pub mod config;
pub mod debugging;
pub mod error;
pub mod font;
pub mod logging;
pub mod mesh;
pub mod renderer;
pub mod shader;
pub mod sprite;
pub mod texture;

use std::path::PathBuf;

use clap::Parser;

use crate::chapters::ChapterName;
use crate::config::AppConfig;
use crate::error::Result;

/// OpenGL tutorial chapters, one window each.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Which chapter to open
    #[arg(value_enum)]
    chapter: ChapterName,

    /// TOML config file; `learn_opengl.toml` is used when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the configured log level (error, warn, info, debug, trace)
    #[arg(short, long)]
    log_level: Option<String>,
}

fn start(cli: &Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;

    let level = logging::parse_level(cli.log_level.as_deref().unwrap_or(&config.log.level));
    logging::init_log(level, config.log.file.as_deref())?;
    log::info!("starting chapter `{}`", cli.chapter.title());

    cli.chapter.run(&config)
}

fn main() { // we will use openGL
    let cli = Cli::parse();

    if let Err(e) = start(&cli) {
        if log::max_level() == log::LevelFilter::Off {
            // failed before the logger was set up
            eprintln!("error: {}", e);
        } else {
            log::error!("{}", e);
        }
        std::process::exit(1);
    }
}
