//! Default locations of the CLI's log and table config.
//!
//! Resolved with `directories`: XDG on Linux, the platform conventions on
//! macOS and Windows.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const LOG_FILE: &str = "casetable.log";
const TABLE_CONFIG: &str = "table.json";

#[derive(Debug, Clone)]
pub struct Paths {
    log_file: PathBuf,
    table_config: PathBuf,
}

impl Paths {
    /// `None` when the platform gives no home directory.
    pub fn resolve() -> Option<Self> {
        let dirs = ProjectDirs::from("dev", "casetable", "casetable")?;
        Some(Self::under(dirs.cache_dir(), dirs.config_dir()))
    }

    fn under(cache: &Path, config: &Path) -> Self {
        Self {
            log_file: cache.join(LOG_FILE),
            table_config: config.join(TABLE_CONFIG),
        }
    }

    /// Log file used when `--log-file` is not given.
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Table config read when `--config` is not given, if the file exists.
    pub fn table_config(&self) -> Option<&Path> {
        Some(self.table_config.as_path()).filter(|path| path.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_dirs() {
        let paths = Paths::under(Path::new("/cache/casetable"), Path::new("/config/casetable"));
        assert_eq!(paths.log_file(), Path::new("/cache/casetable/casetable.log"));
        assert_eq!(paths.table_config, PathBuf::from("/config/casetable/table.json"));
    }

    #[test]
    fn test_absent_table_config_is_skipped() {
        let paths = Paths::under(Path::new("/nonexistent"), Path::new("/nonexistent"));
        assert_eq!(paths.table_config(), None);
    }
}
