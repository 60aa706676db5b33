//! Per-fixture logging.
//!
//! Each fixture builds its own [`TestLog`], which installs a `tracing`
//! subscriber for the current thread only and removes it on drop. Nothing
//! global is touched, so suites running side by side keep separate output.

use tracing::subscriber::DefaultGuard;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// Scoped log output for one test
#[derive(Debug)]
pub struct TestLog {
    name: String,
    _guard: DefaultGuard,
}

impl TestLog {
    /// Install a message-only subscriber at `info` (or `RUST_LOG`)
    #[must_use]
    pub fn install(name: impl Into<String>) -> Self {
        Self::install_with_level(name, Level::INFO)
    }

    /// Install a message-only subscriber at `level` unless `RUST_LOG` says otherwise
    #[must_use]
    pub fn install_with_level(name: impl Into<String>, level: Level) -> Self {
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(false)
            .without_time()
            .with_test_writer()
            .finish();
        Self {
            name: name.into(),
            _guard: tracing::subscriber::set_default(subscriber),
        }
    }

    /// Test name this log belongs to
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Log a numbered test step: `Step 1. Create a new task`
    pub fn step(&self, number: u32, description: &str) {
        info!(test = %self.name, "Step {number}. {description}");
    }
}
