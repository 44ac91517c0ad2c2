//! High score persisted as a small TOML file.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::infrastructure::traits::{FileSystem, ScoreStore};

/// File name of the score file inside the data directory.
pub const HIGH_SCORE_FILE: &str = "highscore.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// [`ScoreStore`] writing `high_score = N` to a TOML file.
pub struct FileScoreStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: PathBuf) -> Self {
        Self { fs, path }
    }

    /// Store at `<data_dir>/highscore.toml`.
    pub fn in_dir(fs: Arc<dyn FileSystem>, data_dir: &Path) -> Self {
        Self::new(fs, data_dir.join(HIGH_SCORE_FILE))
    }
}

impl ScoreStore for FileScoreStore {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load_high_score(&self) -> io::Result<u32> {
        if !self.fs.exists(&self.path) {
            return Ok(0);
        }
        let content = self.fs.read_to_string(&self.path)?;
        let file: ScoreFile = toml::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        Ok(file.high_score)
    }

    fn save_high_score(&self, score: u32) -> io::Result<()> {
        let content = toml::to_string(&ScoreFile { high_score: score })
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        self.fs.ensure_parent(&self.path)?;
        self.fs.write(&self.path, &content)?;
        debug!("high score {} written to {}", score, self.path.display());
        Ok(())
    }

    fn reset(&self) -> io::Result<()> {
        if self.fs.exists(&self.path) {
            self.fs.remove_file(&self.path)?;
        }
        Ok(())
    }
}
