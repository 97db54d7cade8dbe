use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// The newline-delimited hand-off file consumed by the engine's `--file`
/// mode: one dropped path per line, in invocation order.
///
/// The launcher appends, the engine reads, the launcher deletes. Nothing in
/// between validates the paths; the engine owns that.
#[derive(Debug)]
pub struct TransferFile {
    path: PathBuf,
}

impl TransferFile {
    /// Use a caller-chosen, fixed location. A file already present there is
    /// kept as-is and appended to, stale content included.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reserve a uniquely named location under the system temp directory, so
    /// two launches in flight can never interleave their appends.
    pub fn for_session() -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix("suprenam-")
            .suffix(".txt")
            .tempfile()
            .context("Failed to reserve a transfer file in the temp directory")?;
        let (_, path) = file
            .keep()
            .context("Failed to persist the transfer file for the engine")?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Append each path as its own line, verbatim and in order. Pre-existing
    /// content is never truncated. An empty list leaves the file untouched
    /// (and uncreated).
    pub fn append_paths(&self, paths: &[PathBuf]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .with_context(|| {
                format!("Failed to open transfer file {} for appending", self.path.display())
            })?;
        for path in paths {
            writeln!(file, "{}", path.display()).with_context(|| {
                format!("Failed to append to transfer file {}", self.path.display())
            })?;
        }
        Ok(())
    }

    /// Delete the file. Missing is fine: cleanup is unconditional and may
    /// race a crashed earlier run that never created it.
    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| {
                format!("Failed to remove transfer file {}", self.path.display())
            }),
        }
    }
}
