//! Service container for dependency injection
//!
//! Wires up the catalog, settings and I/O implementations.

use std::sync::Arc;

use crate::application::{ApplicationResult, Catalog};
use crate::config::Settings;
use crate::infrastructure::score_store::FileScoreStore;
use crate::infrastructure::traits::{
    Clock, FileSystem, RealFileSystem, ScoreStore, SystemClock,
};

/// Container holding the shared catalog and I/O boundaries.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Validated reference content
    pub catalog: Arc<Catalog>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Time source for quiz deadlines
    pub clock: Arc<dyn Clock>,

    /// High score persistence
    pub scores: Arc<dyn ScoreStore>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> ApplicationResult<Self> {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let scores = Arc::new(FileScoreStore::in_dir(fs.clone(), &settings.data_dir));
        Self::with_deps(settings, fs, Arc::new(SystemClock), scores)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        clock: Arc<dyn Clock>,
        scores: Arc<dyn ScoreStore>,
    ) -> ApplicationResult<Self> {
        let catalog = Arc::new(Catalog::reference_with(settings.matcher())?);
        let settings = Arc::new(settings);

        Ok(Self {
            settings,
            catalog,
            fs,
            clock,
            scores,
        })
    }
}
