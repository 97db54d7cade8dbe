use crate::alert::LaunchError;
use crate::transfer::TransferFile;
use std::path::{Path, PathBuf};

/// What to ask of the engine, decided once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Rename the paths listed in the transfer file at this location.
    Rename(PathBuf),
    /// Undo the previous session.
    Undo,
}

/// Pick the run's directive from two existence probes.
///
/// The transfer file wins the tie-break: when both it and the session log
/// are present, rename mode runs and the undo opportunity is skipped for
/// this invocation (the engine's log is left untouched). With neither
/// present there is nothing to do, which is a usage error.
///
/// The session log belongs to the engine; its mere presence means a prior
/// session is eligible for undo. It is never read here.
pub fn decide(
    transfer: Option<&TransferFile>,
    session_log: &Path,
) -> Result<Directive, LaunchError> {
    if let Some(transfer) = transfer {
        if transfer.exists() {
            return Ok(Directive::Rename(transfer.path().to_path_buf()));
        }
    }

    if session_log.exists() {
        return Ok(Directive::Undo);
    }

    Err(LaunchError::Usage {
        body: "Drop one or more files onto Suprenam to rename them. \
               Launching it without any file undoes the previous session."
            .to_string(),
    })
}
