use std::fs;
use std::path::Path;

use tracing::{error, warn};

/// Reset the output directory: forcibly remove anything at `path`, then
/// create a fresh empty directory.
///
/// Failures are logged and swallowed — the run proceeds and individual
/// artifact writes fail downstream instead. The end state on success is
/// always a fresh empty directory, regardless of what was there before.
pub fn prepare(path: &Path) {
    if path.exists() {
        warn!(path = %path.display(), "clearing output directory");
        let removed = if path.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        if let Err(e) = removed {
            error!(path = %path.display(), error = %e, "failed to clear output directory");
        }
    }
    if let Err(e) = fs::create_dir_all(path) {
        error!(path = %path.display(), error = %e, "failed to create output directory");
    }
}
