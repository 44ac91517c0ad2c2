//! Test helpers: tracing setup, a hand-driven clock and an in-memory score store.

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, Once};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::infrastructure::traits::{Clock, ScoreStore};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "trace");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // rand internals are noise at trace level
    let noisy_modules = ["rand"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::ENTER)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset_ms: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset_ms: AtomicU64::new(0),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset_ms
            .fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + Duration::from_millis(self.offset_ms.load(Ordering::SeqCst))
    }
}

/// In-memory high score.
#[derive(Debug)]
pub struct MemoryScoreStore {
    location: PathBuf,
    high_score: Mutex<u32>,
}

impl MemoryScoreStore {
    pub fn new(high_score: u32) -> Self {
        Self {
            location: PathBuf::from("memory"),
            high_score: Mutex::new(high_score),
        }
    }

    pub fn get(&self) -> u32 {
        self.high_score.lock().map(|g| *g).unwrap_or_default()
    }

    fn with_score<T>(&self, f: impl FnOnce(&mut u32) -> T) -> io::Result<T> {
        self.high_score
            .lock()
            .map(|mut guard| f(&mut guard))
            .map_err(|_| io::Error::other("score lock poisoned"))
    }
}

impl ScoreStore for MemoryScoreStore {
    fn location(&self) -> &Path {
        &self.location
    }

    fn load_high_score(&self) -> io::Result<u32> {
        self.with_score(|s| *s)
    }

    fn save_high_score(&self, score: u32) -> io::Result<()> {
        self.with_score(|s| *s = score)
    }

    fn reset(&self) -> io::Result<()> {
        self.with_score(|s| *s = 0)
    }
}
