use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use suprenam_launcher_core::{
    launch_operation, LaunchError, Settings, ALERT_EXIT_CODE, FALLBACK_PYTHON, PREFERRED_PYTHON,
};

/// Desktop launcher for the Suprenam batch renamer.
///
/// Drop files onto it (or pass them as arguments) to rename them; launch it
/// with no arguments to undo the previous session.
#[derive(Parser, Debug)]
#[command(name = "suprenam-launcher")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Files to rename, as delivered by a drag-and-drop action
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Location of the engine script (suprenam.py)
    #[arg(long, env = "SUPRENAM_ENGINE", value_name = "PATH")]
    engine: PathBuf,

    /// Root directory for the engine's imports (defaults to the engine's parent)
    #[arg(long, env = "SUPRENAM_LIBRARY", value_name = "DIR")]
    library_dir: Option<PathBuf>,

    /// Preferred, specifically-versioned interpreter name
    #[arg(long, default_value = PREFERRED_PYTHON, value_name = "NAME")]
    python: String,

    /// Generic interpreter name tried when the preferred one is missing
    #[arg(long, default_value = FALLBACK_PYTHON, value_name = "NAME")]
    python_fallback: String,

    /// Fixed transfer file location (default: a unique file in the temp directory)
    #[arg(long, env = "SUPRENAM_TRANSFER_FILE", value_name = "PATH")]
    transfer_file: Option<PathBuf>,

    /// Session log whose presence enables undoing the previous session
    #[arg(long, env = "SUPRENAM_SESSION_LOG", value_name = "PATH")]
    session_log: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            // Alert-worthy conditions go to the desktop wrapper on stdout;
            // anything else is an internal error.
            if let Some(alert) = e.downcast_ref::<LaunchError>() {
                println!("{}", alert.to_alert_line());
            } else {
                eprintln!("Error: {e:#}");
            }
            process::exit(ALERT_EXIT_CODE);
        },
    }
}

fn run(cli: Cli) -> Result<i32> {
    let library_dir = match cli.library_dir {
        Some(dir) => dir,
        None => cli
            .engine
            .parent()
            .map(std::path::Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    let session_log = match cli.session_log {
        Some(path) => path,
        None => default_session_log()?,
    };

    let settings = Settings {
        preferred_python: cli.python,
        fallback_python: cli.python_fallback,
        engine_script: cli.engine,
        library_dir,
        transfer_path: cli.transfer_file,
        session_log,
    };

    launch_operation(&cli.paths, &settings)
}

/// Engine-owned session log, under the per-user configuration directory.
fn default_session_log() -> Result<PathBuf> {
    let config_dir =
        dirs::config_dir().context("Could not determine the user configuration directory")?;
    Ok(config_dir.join("suprenam").join("previous_session.log"))
}
