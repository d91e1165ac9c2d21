//! Per-run log of privileged package manager commands
//!
//! Each run gets a timestamped file in the temp directory so a failed
//! install can be diagnosed after the terminal output has scrolled away.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};

const LOG_PREFIX: &str = "vpm-actions-";
const LOG_SUFFIX: &str = ".log";

/// Append-only log file of the commands run during a session
pub struct ActionLog {
    file: Mutex<File>,
    path: PathBuf,
}

impl ActionLog {
    /// Creates a timestamped log file in the system temp directory
    pub fn create() -> Result<Self> {
        Self::create_in(&std::env::temp_dir())
    }

    /// Creates a timestamped log file in `dir`
    pub fn create_in(dir: &Path) -> Result<Self> {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        let path = dir.join(log_file_name(&stamp));

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to create action log at {}", path.display()))?;

        let log = Self {
            file: Mutex::new(file),
            path,
        };

        log.write_line("INFO", "=== Video Player Manager action log ===");
        log.write_line("INFO", &format!("Version: {}", env!("CARGO_PKG_VERSION")));
        log.write_line(
            "INFO",
            &format!("Started: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S")),
        );

        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records a finished command and its exit code
    pub fn command(&self, command: &str, exit_code: Option<i32>) {
        let result = match exit_code {
            Some(0) => "ok".to_string(),
            Some(code) => format!("exit {}", code),
            None => "killed by signal".to_string(),
        };
        self.write_line("CMD", &format!("{} -> {}", command, result));
    }

    pub fn info(&self, message: &str) {
        self.write_line("INFO", message);
    }

    pub fn error(&self, message: &str) {
        self.write_line("ERROR", message);
    }

    fn write_line(&self, level: &str, message: &str) {
        let timestamp = chrono::Local::now().format("%H:%M:%S");
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "[{}] [{}] {}", timestamp, level, message);
            let _ = file.flush();
        }
    }

    /// Removes all but the newest `keep_count` action logs in `dir`
    pub fn cleanup_old_logs(dir: &Path, keep_count: usize) -> Result<()> {
        let mut stamps: Vec<String> = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read {}", dir.display()))?
            .flatten()
            .filter_map(|entry| log_stamp(&entry.file_name().to_string_lossy()).map(str::to_owned))
            .collect();

        // Stamps are zero-padded, so lexical order is chronological
        stamps.sort_unstable_by(|a, b| b.cmp(a));

        for stale in stamps.iter().skip(keep_count) {
            let _ = std::fs::remove_file(dir.join(log_file_name(stale)));
        }

        Ok(())
    }
}

fn log_file_name(stamp: &str) -> String {
    format!("{}{}{}", LOG_PREFIX, stamp, LOG_SUFFIX)
}

/// Timestamp part of an action log file name, `None` for other files
fn log_stamp(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix(LOG_PREFIX)?
        .strip_suffix(LOG_SUFFIX)
        .filter(|stamp| !stamp.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_writes_header() {
        let dir = TempDir::new().unwrap();
        let log = ActionLog::create_in(dir.path()).unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        assert!(contents.contains("action log"));
        assert!(contents.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_command_results_are_recorded() {
        let dir = TempDir::new().unwrap();
        let log = ActionLog::create_in(dir.path()).unwrap();

        log.command("apt install -y mpv", Some(0));
        log.command("apt remove -y vlc", Some(100));
        log.command("pacman -R --noconfirm mpv", None);
        log.error("Failed to execute zypper");

        let contents = std::fs::read_to_string(log.path()).unwrap();
        assert!(contents.contains("[CMD] apt install -y mpv -> ok"));
        assert!(contents.contains("[CMD] apt remove -y vlc -> exit 100"));
        assert!(contents.contains("killed by signal"));
        assert!(contents.contains("[ERROR] Failed to execute zypper"));
    }

    #[test]
    fn test_log_file_name_is_timestamped() {
        let dir = TempDir::new().unwrap();
        let log = ActionLog::create_in(dir.path()).unwrap();

        let name = log.path().file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("vpm-actions-"));
        assert!(name.ends_with(".log"));
    }

    #[test]
    fn test_log_stamp_round_trips_file_name() {
        assert_eq!(log_stamp(&log_file_name("20240101_120000")), Some("20240101_120000"));
        assert_eq!(log_stamp("vpm-actions-.log"), None);
        assert_eq!(log_stamp("nameless.log"), None);
        assert_eq!(log_stamp("vpm-actions-20240101_120000.txt"), None);
    }

    #[test]
    fn test_cleanup_with_fewer_logs_than_kept_removes_nothing() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("vpm-actions-20240101_000000.log"), "").unwrap();

        ActionLog::cleanup_old_logs(dir.path(), 5).unwrap();

        assert!(dir.path().join("vpm-actions-20240101_000000.log").exists());
    }

    #[test]
    fn test_cleanup_keeps_newest_logs() {
        let dir = TempDir::new().unwrap();
        for stamp in ["20240101_000000", "20240102_000000", "20240103_000000"] {
            std::fs::write(dir.path().join(format!("vpm-actions-{}.log", stamp)), "").unwrap();
        }
        std::fs::write(dir.path().join("unrelated.log"), "").unwrap();

        ActionLog::cleanup_old_logs(dir.path(), 2).unwrap();

        assert!(!dir.path().join("vpm-actions-20240101_000000.log").exists());
        assert!(dir.path().join("vpm-actions-20240102_000000.log").exists());
        assert!(dir.path().join("vpm-actions-20240103_000000.log").exists());
        assert!(dir.path().join("unrelated.log").exists());
    }
}
