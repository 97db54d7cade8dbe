use crate::interpreter::Interpreter;
use anyhow::{Context, Result};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Directory appended to the child's search path. Desktop wrappers start
/// their payload with a minimal `PATH` that usually omits it.
pub const EXTRA_PATH_DIR: &str = "/usr/local/bin";

/// The current search path extended with [`EXTRA_PATH_DIR`]. Passed to child
/// processes only; the parent environment is never mutated.
pub fn extended_search_path() -> OsString {
    let current = env::var_os("PATH").unwrap_or_default();
    let mut paths: Vec<PathBuf> = env::split_paths(&current).collect();
    let extra = PathBuf::from(EXTRA_PATH_DIR);
    if !paths.contains(&extra) {
        paths.push(extra);
    }
    env::join_paths(paths).unwrap_or(current)
}

/// The external renaming program, invoked by path and otherwise opaque.
///
/// Exactly two directive shapes exist: "operate on the path list found at
/// file X" and "undo the previous session". Both block until the engine
/// exits and pass its status through untranslated.
#[derive(Debug)]
pub struct Engine {
    program: String,
    script: PathBuf,
    library_dir: PathBuf,
}

impl Engine {
    pub fn new(interpreter: &Interpreter, script: &Path, library_dir: &Path) -> Self {
        Self {
            program: interpreter.program.clone(),
            script: script.to_path_buf(),
            library_dir: library_dir.to_path_buf(),
        }
    }

    /// Rename the paths listed in the transfer file.
    pub fn invoke_rename(&self, transfer: &Path) -> Result<ExitStatus> {
        self.invoke(|cmd| {
            cmd.arg("--file").arg(transfer);
        })
    }

    /// Undo the previous session.
    pub fn invoke_undo(&self) -> Result<ExitStatus> {
        self.invoke(|cmd| {
            cmd.arg("--undo");
        })
    }

    fn invoke(&self, add_args: impl FnOnce(&mut Command)) -> Result<ExitStatus> {
        let mut cmd = Command::new(&self.program);
        cmd.arg(&self.script)
            .env("PATH", extended_search_path())
            .env("PYTHONPATH", &self.library_dir);
        add_args(&mut cmd);
        cmd.status().with_context(|| {
            format!(
                "Failed to run the engine: {} {}",
                self.program,
                self.script.display()
            )
        })
    }
}
