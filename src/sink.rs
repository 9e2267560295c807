//! Where rendered files go.
//!
//! The pipeline never touches the filesystem directly; it writes through an
//! [`OutputSink`]. [`FsSink`] is the real implementation.

use std::fs;
use std::io;
use std::path::Path;

pub trait OutputSink {
    /// Makes sure `path` exists as a directory, creating parents as needed.
    fn create_dir_all(&mut self, path: &Path) -> io::Result<()>;

    /// Removes `path` and everything below it if present, then creates it
    /// empty.
    fn recreate_dir(&mut self, path: &Path) -> io::Result<()>;

    /// Writes `bytes` to `path`, replacing any existing file.
    fn write_file(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// Writes to the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSink;

impl OutputSink for FsSink {
    fn create_dir_all(&mut self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn recreate_dir(&mut self, path: &Path) -> io::Result<()> {
        match fs::remove_dir_all(path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
        fs::create_dir_all(path)
    }

    fn write_file(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        fs::write(path, bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recreate_dir_clears_previous_contents() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("AppIcon.appiconset");
        let mut sink = FsSink;

        sink.create_dir_all(&dir).unwrap();
        sink.write_file(&dir.join("stale.png"), b"old").unwrap();

        sink.recreate_dir(&dir).unwrap();

        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn recreate_dir_creates_missing_parents() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("a/b/c");

        FsSink.recreate_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }
}
