//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "arbor";
const APPLICATION: &str = "arbor";

/// File the running process logs to.
pub const LATEST_LOG: &str = "latest.log";

/// Number of archived logs kept next to [`LATEST_LOG`].
pub const KEEP_ARCHIVES: usize = 10;

const ARCHIVE_PREFIX: &str = "arbor-";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory, where logs go.
///
/// - Linux: `$XDG_CACHE_HOME/arbor` or `~/.cache/arbor`
/// - macOS: `~/Library/Caches/dev.arbor.arbor`
/// - Windows: `C:\Users\<User>\AppData\Local\arbor\arbor\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/arbor` or `~/.config/arbor`
/// - macOS: `~/Library/Application Support/dev.arbor.arbor`
/// - Windows: `C:\Users\<User>\AppData\Roaming\arbor\arbor\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the config file.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archive the previous run's log in `dir` and prune old archives.
///
/// Archives are named `arbor-YYYYMMDD-HHMMSS-mmm.log`, so name order is age
/// order. A missing directory or log is not an error.
pub fn rotate_logs(dir: &Path) -> io::Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    let latest = dir.join(LATEST_LOG);
    if latest.is_file() {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S-%3f");
        fs::rename(&latest, dir.join(format!("{ARCHIVE_PREFIX}{stamp}.log")))?;
    }

    let archives = archived_logs(dir)?;
    let excess = archives.len().saturating_sub(KEEP_ARCHIVES);
    for path in &archives[..excess] {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Archived logs in `dir`, oldest first.
pub fn archived_logs(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut archives = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let archived = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(ARCHIVE_PREFIX) && name.ends_with(".log"));
        if archived {
            archives.push(path);
        }
    }
    archives.sort();
    Ok(archives)
}
