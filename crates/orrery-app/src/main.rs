//! Headless Orrery viewer.
//!
//! Loads `config.ron` (CLI flags override it), the scene manifest, and the
//! journal data, then replays an input script frame by frame and logs what
//! the camera and panels do.
//!
//! Run with `cargo run -p orrery-app -- --script demos/tour.ron`.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use orrery_app::{
    AppError, ConsoleJournalPanel, ConsoleLoginPanel, FrameClock, InputEvent, InputScript,
    LogViewport, Orrery, PlatformDirs, ScriptStep,
};
use orrery_config::{CliArgs, Config};
use orrery_journal::MemoryJournal;
use orrery_scene::{RonSceneLoader, SceneLoader};
use tokio::sync::oneshot;
use tracing::{error, info, warn};

/// Target frame interval of the headless loop.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Extra time after the last scripted event so flights can land.
const SETTLE_SECS: f32 = 1.5;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match args.config.as_deref() {
        Some(dir) => PlatformDirs::with_config_dir(dir),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve platform directories: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    orrery_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!(config_dir = %dirs.config_dir.display(), "Orrery starting");

    match run(config, args.script.as_deref()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config, script_path: Option<&Path>) -> Result<(), AppError> {
    let mut script = match script_path {
        Some(path) => InputScript::load(path).await?,
        None => default_script(),
    };

    let journal = match MemoryJournal::load(Path::new(&config.journal.data_path)).await {
        Ok(journal) => journal,
        Err(e) => {
            warn!("{e}; every lookup will fall back to node names");
            MemoryJournal::default()
        }
    };

    let mut orrery = Orrery::new(
        &config,
        Arc::new(journal),
        ConsoleJournalPanel::default(),
        ConsoleLoginPanel::default(),
    );
    orrery.start();

    let (scene_tx, mut scene_rx) = oneshot::channel();
    let loader = RonSceneLoader::new(config.scene.model_scale);
    let model_path = config.scene.model_path.clone();
    tokio::spawn(async move {
        let _ = scene_tx.send(loader.load(&model_path).await);
    });
    let mut scene_pending = true;

    let mut renderer = LogViewport::new(
        config.window.width,
        config.window.height,
        config.debug.trace_camera,
    );
    let mut interval = tokio::time::interval(FRAME_INTERVAL);
    let mut clock = FrameClock::new();
    let end = script.end_time() + SETTLE_SECS;

    loop {
        interval.tick().await;
        let dt = clock.tick();
        let now = clock.total_time() as f32;

        if scene_pending && let Ok(result) = scene_rx.try_recv() {
            orrery.scene_loaded(result);
            scene_pending = false;
        }

        let due: Vec<InputEvent> = script.due(now).cloned().collect();
        for event in due {
            info!(at = now, ?event, "Input");
            orrery.handle(event);
        }

        orrery.frame(dt, &mut renderer);

        if script.is_finished() && now >= end && orrery.controller().active_flight().is_none() {
            break;
        }
    }

    info!(
        frames = renderer.frames(),
        mode = ?orrery.controller().mode(),
        pose = ?orrery.controller().pose(),
        "Replay finished"
    );
    Ok(())
}

/// Without a script: continue as guest and watch the system turn.
fn default_script() -> InputScript {
    // A single step at a finite time; construction cannot fail.
    InputScript::new(vec![ScriptStep {
        at: 0.0,
        event: InputEvent::ContinueAsGuest,
    }])
    .unwrap_or_default()
}
