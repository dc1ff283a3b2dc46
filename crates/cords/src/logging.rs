//! File-backed logging.
//!
//! The terminal belongs to the UI, so log records go to a file in the
//! platform's local data directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use env_logger::{Builder, Env, Target};

/// Name of the log file inside the data directory.
pub const LOG_FILE: &str = "cords.log";

/// Location of the log file, if the platform provides a data directory.
pub fn log_path() -> Option<PathBuf> {
    cords_config::project_dirs().map(|dirs| dirs.data_local_dir().join(LOG_FILE))
}

/// Install the logger.
///
/// `RUST_LOG` takes precedence over `default_level`. Logging stays disabled
/// when the log file cannot be opened.
pub fn init(default_level: &str) {
    let Some(path) = log_path() else {
        return;
    };
    if let Some(parent) = path.parent()
        && fs::create_dir_all(parent).is_err()
    {
        return;
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let env = Env::default().default_filter_or(default_level);
    let _ = Builder::from_env(env)
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();
}
