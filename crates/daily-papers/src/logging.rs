//! Tracing setup with an optional size-rotated log file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "daily_papers.log";

/// Default rotation threshold (500 MB).
pub const DEFAULT_MAX_BYTES: u64 = 500 * 1024 * 1024;

/// Default number of rotated files kept.
pub const DEFAULT_MAX_FILES: usize = 5;

/// Log file settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFileConfig {
    /// Active log file.
    pub path: PathBuf,

    /// Size at which the active file is rotated.
    pub max_bytes: u64,

    /// Rotated files to keep as `<path>.1 .. <path>.N`; 0 truncates in place.
    pub max_files: usize,
}

impl LogFileConfig {
    /// Config for `path` with default limits.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), max_bytes: DEFAULT_MAX_BYTES, max_files: DEFAULT_MAX_FILES }
    }
}

impl Default for LogFileConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILE)
    }
}

/// Append-only log file that rotates once it grows past `max_bytes`.
///
/// Rotation happens between writes, so a single formatted event is never
/// split across files.
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    max_files: usize,
    file: File,
    written: u64,
}

impl RotatingFile {
    /// Open (or create) the active log file.
    ///
    /// # Errors
    ///
    /// Returns error if the file or its parent directory cannot be created.
    pub fn open(config: &LogFileConfig) -> io::Result<Self> {
        if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = open_append(&config.path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            path: config.path.clone(),
            max_bytes: config.max_bytes,
            max_files: config.max_files,
            file,
            written,
        })
    }

    /// Path of the `n`th rotated file.
    #[must_use]
    pub fn backup_path(&self, n: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.max_files == 0 {
            self.file = OpenOptions::new().write(true).truncate(true).open(&self.path)?;
        } else {
            let oldest = self.backup_path(self.max_files);
            if oldest.exists() {
                fs::remove_file(&oldest)?;
            }
            for n in (1..self.max_files).rev() {
                let from = self.backup_path(n);
                if from.exists() {
                    fs::rename(&from, self.backup_path(n + 1))?;
                }
            }
            fs::rename(&self.path, self.backup_path(1))?;
            self.file = open_append(&self.path)?;
        }

        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `log_level`. Events go to stderr (compact or JSON)
/// and, when `file` is set, to a rotating log file without ANSI colors.
///
/// # Errors
///
/// Returns error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init_tracing(log_level: &str, json: bool, file: Option<&LogFileConfig>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let file_layer = match file {
        Some(config) => Some(
            fmt::layer().with_ansi(false).with_writer(Mutex::new(RotatingFile::open(config)?)),
        ),
        None => None,
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(file_layer);

    if json {
        subscriber.with(fmt::layer().json().with_writer(io::stderr)).try_init()?;
    } else {
        subscriber.with(fmt::layer().compact().with_writer(io::stderr)).try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &Path, max_bytes: u64, max_files: usize) -> LogFileConfig {
        LogFileConfig { path: dir.join("app.log"), max_bytes, max_files }
    }

    #[test]
    fn test_rotates_past_limit() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), 16, 2);
        let mut file = RotatingFile::open(&cfg).unwrap();

        file.write_all(b"0123456789\n").unwrap();
        file.write_all(b"abcdefghij\n").unwrap();
        file.flush().unwrap();

        assert_eq!(fs::read_to_string(&cfg.path).unwrap(), "abcdefghij\n");
        assert_eq!(fs::read_to_string(file.backup_path(1)).unwrap(), "0123456789\n");
    }

    #[test]
    fn test_keeps_at_most_max_files() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), 4, 2);
        let mut file = RotatingFile::open(&cfg).unwrap();

        for line in ["aaaa", "bbbb", "cccc", "dddd"] {
            file.write_all(line.as_bytes()).unwrap();
        }
        file.flush().unwrap();

        assert_eq!(fs::read_to_string(&cfg.path).unwrap(), "dddd");
        assert_eq!(fs::read_to_string(file.backup_path(1)).unwrap(), "cccc");
        assert_eq!(fs::read_to_string(file.backup_path(2)).unwrap(), "bbbb");
        assert!(!file.backup_path(3).exists());
    }

    #[test]
    fn test_zero_backups_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), 4, 0);
        let mut file = RotatingFile::open(&cfg).unwrap();

        file.write_all(b"aaaa").unwrap();
        file.write_all(b"bb").unwrap();
        file.flush().unwrap();

        assert_eq!(fs::read_to_string(&cfg.path).unwrap(), "bb");
        assert!(!file.backup_path(1).exists());
    }

    #[test]
    fn test_resumes_size_of_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), 8, 1);
        fs::write(&cfg.path, "1234567").unwrap();

        let mut file = RotatingFile::open(&cfg).unwrap();
        file.write_all(b"89").unwrap();
        file.flush().unwrap();

        assert_eq!(fs::read_to_string(file.backup_path(1)).unwrap(), "1234567");
        assert_eq!(fs::read_to_string(&cfg.path).unwrap(), "89");
    }

    #[test]
    fn test_open_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(&dir.path().join("a").join("b"), 64, 1);

        let mut file = RotatingFile::open(&cfg).unwrap();
        file.write_all(b"line\n").unwrap();
        file.flush().unwrap();

        assert!(dir.path().join("a").join("b").is_dir());
        assert_eq!(fs::read_to_string(&cfg.path).unwrap(), "line\n");
    }

    #[test]
    fn test_tracing_events_reach_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = LogFileConfig::new(dir.path().join("nested").join("papers.log"));
        let writer = Mutex::new(RotatingFile::open(&cfg).unwrap());

        let subscriber = tracing_subscriber::fmt().with_ansi(false).with_writer(writer).finish();
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(count = 3, "Markdown digest generated");
        });

        let contents = fs::read_to_string(&cfg.path).unwrap();
        assert!(contents.contains("Markdown digest generated"));
        assert!(contents.contains("count=3"));
    }
}
