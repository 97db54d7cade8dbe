use crate::alert::LaunchError;
use crate::engine::extended_search_path;
use std::fmt;
use std::io;
use std::process::Command;

/// Specifically-versioned binary name tried first.
pub const PREFERRED_PYTHON: &str = "python3.6";

/// Generic binary name tried when the preferred one is not on the search path.
pub const FALLBACK_PYTHON: &str = "python3";

/// Oldest interpreter the engine supports.
pub const MIN_VERSION: Version = Version { major: 3, minor: 6 };

/// An interpreter version, ordered on the (major, minor) pair.
///
/// `Display` renders the zero-padded 4-digit token (`3.6` becomes `0306`)
/// historically embedded in alert messages. Ordering never goes through that
/// rendering, so components above 99 would still compare correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    /// Parse a version report line such as `Python 3.9.1` (a bare `3.9` or
    /// `3.9.1` is accepted too). The patch component is ignored.
    pub fn parse(report: &str) -> Option<Self> {
        let numbers = report
            .trim()
            .strip_prefix("Python")
            .map_or_else(|| report.trim(), str::trim_start);
        let numbers = numbers.split_whitespace().next()?;
        let mut components = numbers.split('.');
        let major = components.next()?.parse().ok()?;
        let minor = components.next()?.parse().ok()?;
        Some(Self { major, minor })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.major, self.minor)
    }
}

/// The interpreter bound for the rest of the run: a resolvable binary name
/// and the version it reported. Immutable once probed.
#[derive(Debug, Clone)]
pub struct Interpreter {
    pub program: String,
    pub version: Version,
}

impl Interpreter {
    /// Locate a usable interpreter, preferring `preferred` and falling back
    /// to `fallback`, then gate its reported version against [`MIN_VERSION`].
    ///
    /// This runs before any file is touched, so a misconfigured environment
    /// never produces partial side effects.
    pub fn probe(preferred: &str, fallback: &str) -> Result<Self, LaunchError> {
        let (program, report) = match query_version(preferred) {
            Ok(report) => (preferred, report),
            Err(_) => match query_version(fallback) {
                Ok(report) => (fallback, report),
                Err(_) => {
                    return Err(LaunchError::Environment {
                        body: format!(
                            "No usable Python interpreter was found (tried {preferred} and {fallback})."
                        ),
                    })
                },
            },
        };

        let version = Version::parse(&report).ok_or_else(|| LaunchError::Environment {
            body: format!("Could not read the version reported by {program}: {report:?}."),
        })?;

        if version < MIN_VERSION {
            return Err(LaunchError::Environment {
                body: format!("Python 3.6 or higher is required. Yours is {version}."),
            });
        }

        Ok(Self {
            program: program.to_string(),
            version,
        })
    }
}

/// Ask a candidate binary for its version report. Resolution happens on the
/// extended search path, matching the environment the engine will run under.
fn query_version(program: &str) -> io::Result<String> {
    let output = Command::new(program)
        .arg("--version")
        .env("PATH", extended_search_path())
        .output()?;

    if !output.status.success() {
        return Err(io::Error::other(format!(
            "{program} --version exited with {}",
            output.status
        )));
    }

    // Python 2 printed its version on stderr; 3.4+ uses stdout.
    let text = if output.stdout.is_empty() {
        &output.stderr
    } else {
        &output.stdout
    };
    Ok(String::from_utf8_lossy(text).trim().to_string())
}
