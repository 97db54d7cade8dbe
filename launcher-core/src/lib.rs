#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod alert;
pub mod dispatch;
pub mod engine;
pub mod interpreter;
pub mod operations;
pub mod transfer;

pub use alert::{LaunchError, ALERT_EXIT_CODE};
pub use dispatch::{decide, Directive};
pub use engine::{extended_search_path, Engine, EXTRA_PATH_DIR};
pub use interpreter::{Interpreter, Version, FALLBACK_PYTHON, MIN_VERSION, PREFERRED_PYTHON};
pub use operations::{launch_operation, Settings};
pub use transfer::TransferFile;
