//! Test utilities for the observe workspace
//!
//! Shared fixtures, isolated environments and assertions used by the
//! integration suites of the other crates.
//!
//! # Features
//!
//! - **Test Environment**: Isolated `OBSERVE_HOME` with automatic cleanup
//! - **Fixtures**: Sample taxonomies, generated trees and classifier outputs
//! - **Assertions**: Tree consistency and score checks

pub mod assertions;
pub mod environment;
pub mod fixtures;

// Re-export commonly used items
pub use environment::{TestConfig, TestEnvironment};
pub use fixtures::{
    bird_records, bird_scores, bird_taxonomy, generate_records, random_scores, TestTaxon,
};

// Re-export test dependencies for convenience
pub use anyhow::{Context, Result};
pub use tempfile;

/// Initialize test logging (call once per test module)
///
/// Honors `OBSERVE_LOG` so a failing test can be rerun with `OBSERVE_LOG=debug`.
pub fn init_test_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("OBSERVE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Run a test with a clean environment
///
/// # Example
/// ```rust
/// use observe_test::with_test_env;
///
/// with_test_env(|env| {
///     let path = env.write_taxonomy(&observe_test::bird_records())?;
///     assert!(path.exists());
///     Ok(())
/// })
/// .unwrap();
/// ```
pub fn with_test_env<F, R>(f: F) -> Result<R>
where
    F: FnOnce(&TestEnvironment) -> Result<R>,
{
    let env = TestEnvironment::new()?;
    // Cleanup happens automatically via Drop
    f(&env)
}

/// Run a test with a configured environment
pub fn with_configured_env<F, R>(config: TestConfig, f: F) -> Result<R>
where
    F: FnOnce(&TestEnvironment) -> Result<R>,
{
    let env = TestEnvironment::with_config(config)?;
    f(&env)
}
