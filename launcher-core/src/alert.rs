use thiserror::Error;

/// Exit code shared by environment and usage failures.
pub const ALERT_EXIT_CODE: i32 = 2;

/// Conditions the launcher must surface to a human before the engine ever
/// runs. The desktop wrapper intercepts the rendered line and shows it as a
/// native dialog, so the set is deliberately closed: anything else is an
/// internal error and goes to stderr untranslated.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// No usable interpreter, or one below the minimum version.
    #[error("{body}")]
    Environment { body: String },

    /// Nothing to rename and nothing to undo.
    #[error("{body}")]
    Usage { body: String },
}

impl LaunchError {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Environment { .. } => "Fatal error",
            Self::Usage { .. } => "Usage",
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Self::Environment { body } | Self::Usage { body } => body,
        }
    }

    /// Render the single-line wire form understood by the desktop wrapper:
    /// `ALERT:<Title>|<Body>`, title and body separated by exactly one pipe.
    pub fn to_alert_line(&self) -> String {
        format!("ALERT:{}|{}", self.title(), self.body())
    }
}
