//! Replay recorded input events and print the resulting drawing as SVG.
//!
//! Usage: `aurchive <events.json> [config.json]`

use aurchive_core::{CanvasConfig, ConfigError, InputEvent, StrokeSession, TransformError};
use aurchive_render::SvgScene;
use kurbo::Size;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

const VIEWPORT: Size = Size::new(1280.0, 800.0);

#[derive(Debug, Error)]
enum AppError {
    #[error("Usage: aurchive <events.json> [config.json]")]
    Usage,
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse events: {0}")]
    Events(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Event {index} rejected: {source}")]
    Transform {
        index: usize,
        source: TransformError,
    },
}

fn read(path: PathBuf) -> Result<String, AppError> {
    std::fs::read_to_string(&path).map_err(|source| AppError::Read { path, source })
}

fn run() -> Result<String, AppError> {
    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let events_path = args.next().ok_or(AppError::Usage)?;

    let config = match args.next() {
        Some(path) => CanvasConfig::from_json(&read(path)?)?,
        None => CanvasConfig::default(),
    };
    let events: Vec<InputEvent> = serde_json::from_str(&read(events_path)?)?;
    log::info!("Replaying {} events", events.len());

    let mut session = StrokeSession::new(config);
    let mut scene = SvgScene::new(VIEWPORT);
    for (index, event) in events.into_iter().enumerate() {
        session
            .handle_event(event, &mut scene)
            .map_err(|source| AppError::Transform { index, source })?;
    }

    log::info!("Drew {} objects", session.document().len());
    Ok(scene.to_svg())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(svg) => {
            print!("{svg}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{}", err);
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
