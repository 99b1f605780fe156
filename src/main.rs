//! cairn - minimal stacking compositor core
//!
//! The binary runs the core headlessly against a JSON event script:
//! every collaborator command is recorded instead of hitting real
//! hardware, which makes scripted runs reproducible and diffable.
//!
//! Usage: `cairn [--config CONFIG.json] SCRIPT.json`

use std::path::PathBuf;
use std::process::ExitCode;

use cairn::config::Config;
use cairn::headless::{HeadlessBackend, RecordingShell, ScriptEvent};
use cairn::CairnState;

const USAGE: &str = "Usage: cairn [--config CONFIG.json] SCRIPT.json
  SCRIPT.json : a JSON array of input/shell/output events to replay";

fn run() -> Result<(), String> {
    let mut config_path: Option<PathBuf> = None;
    let mut script_path: Option<PathBuf> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                config_path = Some(PathBuf::from(path));
            }
            "--help" | "-h" => return Err(USAGE.into()),
            other => script_path = Some(PathBuf::from(other)),
        }
    }
    let script_path = script_path.ok_or(USAGE)?;

    let config = match config_path {
        Some(path) => Config::load(&path).map_err(|e| format!("failed to load config: {e}"))?,
        None => Config::default(),
    };

    let script = std::fs::read_to_string(&script_path)
        .map_err(|e| format!("failed to read {}: {e}", script_path.display()))?;
    let events: Vec<ScriptEvent> =
        serde_json::from_str(&script).map_err(|e| format!("bad script: {e}"))?;

    let mut state = CairnState::new(RecordingShell::new(), HeadlessBackend::new(), config)
        .map_err(|e| format!("bad configuration: {e}"))?;

    tracing::info!("replaying {} events", events.len());
    for event in events {
        if !state.running {
            tracing::info!("terminated by keybinding, stopping replay");
            break;
        }
        event.apply(&mut state);
    }

    for command in state.shell.drain() {
        tracing::info!("shell <- {command:?}");
    }
    for command in state.backend.drain() {
        tracing::info!("backend <- {command:?}");
    }
    tracing::info!(
        "final state: {} outputs, stacking {:?}, focus {:?}, cursor {:?}",
        state.outputs.len(),
        state.views.stacking(),
        state.seat.keyboard_focus,
        state.cursor.mode,
    );
    Ok(())
}

fn main() -> ExitCode {
    if let Ok(env_filter) = tracing_subscriber::EnvFilter::try_from_default_env() {
        tracing_subscriber::fmt()
            .compact()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().compact().init();
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
