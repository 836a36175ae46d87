use std::ffi::OsString;
use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;
use walkdir::WalkDir;

use crate::report::Metric;

/// `top.log` and its rotations `top.log.0` .. `top.log.9`.
pub const DEFAULT_FILE_PATTERN: &str = r"top\.log(\.[0-9])?";

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("error accessing path: {}", .0.display())]
    NotFound(PathBuf),
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("invalid file pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Whole-name match on file names.
#[derive(Clone, Debug)]
pub struct LogFilter {
    pattern: Regex,
}

impl LogFilter {
    pub fn new(pattern: &str) -> Result<Self, DiscoverError> {
        let pattern = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(LogFilter { pattern })
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.pattern.is_match(file_name)
    }
}

impl Default for LogFilter {
    fn default() -> Self {
        LogFilter {
            pattern: Regex::new(&format!("^(?:{DEFAULT_FILE_PATTERN})$"))
                .expect("default file pattern is valid"),
        }
    }
}

/// Recursively collect regular files under `root` whose name matches `filter`,
/// in file-name order. Unreadable entries are logged and skipped.
pub fn find_logs(root: &Path, filter: &LogFilter) -> Result<Vec<PathBuf>, DiscoverError> {
    if !root.exists() {
        return Err(DiscoverError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(DiscoverError::NotADirectory(root.to_path_buf()));
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if filter.matches(name) {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

/// `dir/top.log` → `dir/top.log-mem.csv` (or `-cpu.csv`).
pub fn output_path_for(log: &Path, metric: Metric) -> PathBuf {
    let mut name = OsString::from(log.as_os_str());
    name.push(format!("-{}.csv", metric.file_suffix()));
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_matches_rotations() {
        let filter = LogFilter::default();
        assert!(filter.matches("top.log"));
        assert!(filter.matches("top.log.3"));
        assert!(!filter.matches("top.log.12"));
        assert!(!filter.matches("top.log.bak"));
        assert!(!filter.matches("xtop.log"));
        assert!(!filter.matches("top_log"));
        assert!(!filter.matches("top.log-mem.csv"));
    }

    #[test]
    fn custom_pattern_is_anchored() {
        let filter = LogFilter::new(r"top-\d+\.txt").unwrap();
        assert!(filter.matches("top-20240101.txt"));
        assert!(!filter.matches("old-top-1.txt"));
    }

    #[test]
    fn bad_pattern_is_rejected() {
        assert!(matches!(LogFilter::new("("), Err(DiscoverError::Pattern(_))));
    }

    #[test]
    fn output_paths_get_metric_suffix() {
        let log = Path::new("/var/log/node1/top.log.2");
        assert_eq!(
            output_path_for(log, Metric::VirtualMemory),
            PathBuf::from("/var/log/node1/top.log.2-mem.csv")
        );
        assert_eq!(
            output_path_for(log, Metric::CpuPercent),
            PathBuf::from("/var/log/node1/top.log.2-cpu.csv")
        );
    }
}
