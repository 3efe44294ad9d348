//! Size-rotated log file usable as a `tracing-subscriber` writer.
//!
//! When the active file grows past the size limit it is shifted to `<name>.1`,
//! earlier backups move up one slot (`.1` → `.2`, ...) and the oldest beyond the
//! retention limit is removed.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;

/// Rotation threshold (10 MiB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Backups kept after rotation.
pub const MAX_BACKUP_FILES: usize = 3;

struct Active {
    file: Option<File>,
    written: u64,
}

/// Thread-safe rotating log file.
///
/// The file is opened lazily on first write and appended to.
pub struct RotatingLog {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    active: Mutex<Active>,
}

impl RotatingLog {
    /// Creates a writer with the default limits.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_limits(path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    #[must_use]
    pub fn with_limits(path: impl Into<PathBuf>, max_bytes: u64, backups: usize) -> Self {
        Self {
            path: path.into(),
            max_bytes,
            backups,
            active: Mutex::new(Active {
                file: None,
                written: 0,
            }),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self, slot: usize) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(format!(".{slot}"));
        self.path.with_file_name(name)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return fs::remove_file(&self.path).or_else(ignore_missing);
        }
        fs::remove_file(self.backup_path(self.backups)).or_else(ignore_missing)?;
        for slot in (1..self.backups).rev() {
            fs::rename(self.backup_path(slot), self.backup_path(slot + 1)).or_else(ignore_missing)?;
        }
        fs::rename(&self.path, self.backup_path(1)).or_else(ignore_missing)
    }

    fn write_bytes(&self, buf: &[u8]) -> io::Result<usize> {
        let mut active = self
            .active
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("log lock poisoned: {e}")))?;

        if active.file.is_none() {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
            active.written = file.metadata().map_or(0, |m| m.len());
            active.file = Some(file);
        }

        if active.written > 0 && active.written + buf.len() as u64 > self.max_bytes {
            active.file = None;
            self.rotate()?;
            active.file = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
            active.written = 0;
        }

        let file = active
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "log file unavailable"))?;
        file.write_all(buf)?;
        active.written += buf.len() as u64;
        Ok(buf.len())
    }
}

fn ignore_missing(error: io::Error) -> io::Result<()> {
    if error.kind() == io::ErrorKind::NotFound {
        Ok(())
    } else {
        Err(error)
    }
}

impl std::fmt::Debug for RotatingLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingLog")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("backups", &self.backups)
            .finish_non_exhaustive()
    }
}

/// Per-event handle handed out to the fmt layer.
#[derive(Debug)]
pub struct RotatingLogWriter<'a>(&'a RotatingLog);

impl Write for RotatingLogWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write_bytes(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for RotatingLog {
    type Writer = RotatingLogWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingLogWriter(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotates_and_keeps_limited_backups() {
        let dir = tempfile::tempdir().unwrap();
        let log = RotatingLog::with_limits(dir.path().join("planboard.log"), 10, 2);

        for line in ["aaaaaaaa\n", "bbbbbbbb\n", "cccccccc\n", "dddddddd\n"] {
            log.make_writer().write_all(line.as_bytes()).unwrap();
        }

        let read = |name: &str| fs::read_to_string(dir.path().join(name)).unwrap();
        assert_eq!(read("planboard.log"), "dddddddd\n");
        assert_eq!(read("planboard.log.1"), "cccccccc\n");
        assert_eq!(read("planboard.log.2"), "bbbbbbbb\n");
        assert!(!dir.path().join("planboard.log.3").exists());
    }

    #[test]
    fn appends_below_limit() {
        let dir = tempfile::tempdir().unwrap();
        let log = RotatingLog::new(dir.path().join("logs").join("planboard.log"));
        log.make_writer().write_all(b"one\n").unwrap();
        log.make_writer().write_all(b"two\n").unwrap();
        assert_eq!(fs::read_to_string(log.path()).unwrap(), "one\ntwo\n");
    }
}
