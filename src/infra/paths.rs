// src/infra/paths.rs — Config and data locations
//
// LEARNPATH_HOME overrides everything. Otherwise config lives in ~/.learnpath/
// and data in the platform data dir.

use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

fn learnpath_home() -> Option<PathBuf> {
    std::env::var_os("LEARNPATH_HOME").map(PathBuf::from)
}

/// Configuration directory: $LEARNPATH_HOME/ or ~/.learnpath/
pub fn config_dir() -> PathBuf {
    if let Some(home) = learnpath_home() {
        return home;
    }
    match BaseDirs::new() {
        Some(dirs) => dirs.home_dir().join(".learnpath"),
        None => PathBuf::from(".learnpath"),
    }
}

/// Data directory: $LEARNPATH_HOME/data/ or the platform-local data dir.
pub fn data_dir() -> PathBuf {
    if let Some(home) = learnpath_home() {
        return home.join("data");
    }
    match ProjectDirs::from("", "", "learnpath") {
        Some(dirs) => dirs.data_local_dir().to_path_buf(),
        None => config_dir().join("data"),
    }
}

pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Default location of the JSON progress store.
pub fn progress_file_path() -> PathBuf {
    data_dir().join("progress.json")
}
