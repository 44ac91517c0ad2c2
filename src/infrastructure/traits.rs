//! I/O seams of the quiz: files, time and the high score.
//!
//! `util::testing` has in-memory doubles for `Clock` and `ScoreStore`.

use std::io;
use std::path::Path;
use std::time::Instant;

/// The few file operations the score store needs.
pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replace the file content.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Make sure the directory holding `path` exists.
    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

/// Monotonic time source for the quiz deadline.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Persistent storage of the best quiz score.
pub trait ScoreStore: Send + Sync {
    /// Where the score lives, for error messages.
    fn location(&self) -> &Path;

    /// Stored high score, 0 if nothing was stored yet.
    fn load_high_score(&self) -> io::Result<u32>;

    fn save_high_score(&self, score: u32) -> io::Result<()>;

    /// Forget the stored high score.
    fn reset(&self) -> io::Result<()>;
}

/// `std::fs` passthrough.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}

/// Wall-clock implementation backed by `Instant::now`.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
