//! Where lookup-tui keeps its settings and log.

use std::path::PathBuf;

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "lookup", "lookup-tui")
}

/// `settings.json` in the per-user config directory, if a home is known.
pub fn settings_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("settings.json"))
}

/// The debug log, rewritten on every run, in the per-user cache directory.
pub fn log_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().join("lookup-tui.log"))
}
