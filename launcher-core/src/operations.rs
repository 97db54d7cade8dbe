//! The high-level launch operation: probe, collect, dispatch, invoke, clean
//! up. This is the whole of the launcher's control flow, separated from CLI
//! concerns like argument parsing and alert rendering.

use crate::dispatch::{decide, Directive};
use crate::engine::Engine;
use crate::interpreter::Interpreter;
use crate::transfer::TransferFile;
use anyhow::Result;
use std::path::PathBuf;

/// Everything the launch operation needs, resolved up front so every
/// collaborator is injectable.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Specifically-versioned interpreter name tried first.
    pub preferred_python: String,
    /// Generic interpreter name tried second.
    pub fallback_python: String,
    /// Location of the engine script.
    pub engine_script: PathBuf,
    /// Root directory for the engine's imports.
    pub library_dir: PathBuf,
    /// Fixed transfer file location. `None` reserves a unique per-invocation
    /// file under the system temp directory.
    pub transfer_path: Option<PathBuf>,
    /// Engine-owned file whose presence means a prior session can be undone.
    pub session_log: PathBuf,
}

/// Run one launch from start to finish and return the exit code to surface.
///
/// The interpreter is probed before any file is touched. The transfer file,
/// when one was written, is deleted after a rename invocation returns,
/// whether or not the engine succeeded. The engine's exit status is passed
/// through untranslated.
pub fn launch_operation(paths: &[PathBuf], settings: &Settings) -> Result<i32> {
    let interpreter = Interpreter::probe(&settings.preferred_python, &settings.fallback_python)?;

    let transfer = collect_paths(paths, settings)?;
    let directive = decide(transfer.as_ref(), &settings.session_log)?;

    let engine = Engine::new(&interpreter, &settings.engine_script, &settings.library_dir);
    let status = match directive {
        Directive::Rename(transfer_path) => {
            let status = engine.invoke_rename(&transfer_path);
            if let Some(transfer) = &transfer {
                transfer.remove()?;
            }
            status?
        },
        Directive::Undo => engine.invoke_undo()?,
    };

    Ok(status.code().unwrap_or(1))
}

/// Accumulate the dropped paths into a transfer file. With no paths, nothing
/// is written; a fixed transfer location is still handed to the dispatcher
/// so a leftover file from an interrupted run keeps its historical meaning.
fn collect_paths(paths: &[PathBuf], settings: &Settings) -> Result<Option<TransferFile>> {
    if paths.is_empty() {
        return Ok(settings.transfer_path.as_ref().map(TransferFile::at));
    }

    let transfer = match &settings.transfer_path {
        Some(path) => TransferFile::at(path),
        None => TransferFile::for_session()?,
    };
    transfer.append_paths(paths)?;
    Ok(Some(transfer))
}
