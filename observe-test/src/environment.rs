//! Test environment management
//!
//! Provides isolated test environments with automatic cleanup using RAII.
//!
//! Path helpers in `observe-core` cache their result for the life of the
//! process, so the environment variables set here matter mostly to child
//! processes (the `observe` binary under `assert_cmd`). Use [`TestEnvironment::vars`]
//! to pass them explicitly.

use anyhow::{Context, Result};
use observe_data::{ClassifierOutput, TaxonRecord};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Global registry to prevent environment variable conflicts
static ENV_REGISTRY: Lazy<Arc<Mutex<HashMap<String, String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(HashMap::new())));

/// Configuration for test environment
#[derive(Debug, Clone, Default)]
pub struct TestConfig {
    /// Preserve workspace after test (for debugging)
    pub preserve_on_failure: bool,
    /// Enable verbose logging
    pub verbose: bool,
    /// Custom prefix for test directories
    pub prefix: Option<String>,
}

/// Isolated test environment with automatic cleanup
pub struct TestEnvironment {
    temp_dir: Option<TempDir>,
    root_path: PathBuf,
    /// Saved environment variables for restoration
    saved_env: HashMap<String, Option<String>>,
    config: TestConfig,
    failed: Arc<Mutex<bool>>,
}

impl TestEnvironment {
    /// Create a new test environment with default config
    pub fn new() -> Result<Self> {
        Self::with_config(TestConfig::default())
    }

    /// Create a new test environment with custom config
    pub fn with_config(config: TestConfig) -> Result<Self> {
        let prefix = config.prefix.as_deref().unwrap_or("observe-test");
        let temp_dir =
            TempDir::with_prefix(prefix).context("Failed to create temporary directory")?;

        let root_path = temp_dir.path().to_path_buf();
        std::fs::create_dir_all(root_path.join("data"))?;
        std::fs::create_dir_all(root_path.join("cache"))?;

        let mut env = Self {
            temp_dir: Some(temp_dir),
            root_path,
            saved_env: HashMap::new(),
            config,
            failed: Arc::new(Mutex::new(false)),
        };

        env.setup_environment()?;

        Ok(env)
    }

    /// Variables pointing the observe paths into this environment
    pub fn vars(&self) -> Vec<(&'static str, String)> {
        let mut vars = vec![
            ("OBSERVE_HOME", self.root_path.to_string_lossy().to_string()),
            ("OBSERVE_DATA_DIR", self.data_dir().to_string_lossy().to_string()),
            ("OBSERVE_CACHE_DIR", self.cache_dir().to_string_lossy().to_string()),
        ];
        if self.config.verbose {
            vars.push(("OBSERVE_LOG", "debug".to_string()));
        }
        vars
    }

    fn setup_environment(&mut self) -> Result<()> {
        for (key, value) in self.vars() {
            self.saved_env
                .insert(key.to_string(), std::env::var(key).ok());
            std::env::set_var(key, value);
        }

        let mut registry = ENV_REGISTRY
            .lock()
            .map_err(|_| anyhow::anyhow!("Environment registry poisoned"))?;
        registry.insert(
            self.root_path.to_string_lossy().to_string(),
            "active".to_string(),
        );

        Ok(())
    }

    /// Get the root path of the test environment (OBSERVE_HOME)
    pub fn root(&self) -> &Path {
        &self.root_path
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root_path.join("data")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root_path.join("cache")
    }

    pub fn config_path(&self) -> PathBuf {
        self.root_path.join("config.toml")
    }

    /// Create a subdirectory in the test environment
    pub fn create_dir(&self, name: &str) -> Result<PathBuf> {
        let path = self.root_path.join(name);
        std::fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Write a file in the test environment, returning its full path
    pub fn write_file(&self, path: impl AsRef<Path>, content: &[u8]) -> Result<PathBuf> {
        let full_path = self.root_path.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&full_path, content)?;
        Ok(full_path)
    }

    /// Read a file from the test environment
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<Vec<u8>> {
        let full_path = self.root_path.join(path);
        Ok(std::fs::read(full_path)?)
    }

    /// Write records as `data/taxonomy.json`
    pub fn write_taxonomy(&self, records: &[TaxonRecord]) -> Result<PathBuf> {
        let json = serde_json::to_vec_pretty(records)?;
        self.write_file("data/taxonomy.json", &json)
    }

    /// Write a classifier output as a JSON array under `data/`
    pub fn write_scores(&self, name: &str, output: &ClassifierOutput) -> Result<PathBuf> {
        let json = serde_json::to_vec(output.values())?;
        self.write_file(Path::new("data").join(name), &json)
    }

    /// Mark test as failed (prevents cleanup if preserve_on_failure is set)
    pub fn mark_failed(&self) {
        if let Ok(mut failed) = self.failed.lock() {
            *failed = true;
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failed.lock().map(|failed| *failed).unwrap_or(false)
    }

    /// Manually preserve the environment (for debugging)
    pub fn preserve(&mut self) {
        if let Some(temp_dir) = self.temp_dir.take() {
            let path = temp_dir.keep();
            println!("Test environment preserved at: {}", path.display());
        }
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        for (key, value) in &self.saved_env {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }

        if let Ok(mut registry) = ENV_REGISTRY.lock() {
            registry.remove(&self.root_path.to_string_lossy().to_string());
        }

        if self.config.preserve_on_failure && self.is_failed() {
            if let Some(temp_dir) = self.temp_dir.take() {
                let path = temp_dir.keep();
                eprintln!("Test failed - environment preserved at: {}", path.display());
            }
        }
        // Otherwise, temp_dir is automatically cleaned up when dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{bird_records, bird_scores};

    #[test]
    fn test_environment_creation() {
        let env = TestEnvironment::new().unwrap();
        assert!(env.root().exists());
        assert!(env.data_dir().exists());
        assert!(env.cache_dir().exists());
    }

    #[test]
    fn test_environment_isolation() {
        let env1 = TestEnvironment::new().unwrap();
        let env2 = TestEnvironment::new().unwrap();

        assert_ne!(env1.root(), env2.root());

        env1.write_file("test.txt", b"env1").unwrap();
        assert!(!env2.root().join("test.txt").exists());
    }

    #[test]
    fn test_environment_cleanup() {
        let path = {
            let env = TestEnvironment::new().unwrap();
            let path = env.root().to_path_buf();
            assert!(path.exists());
            path
        };

        assert!(!path.exists());
    }

    #[test]
    fn test_write_fixtures() {
        let env = TestEnvironment::new().unwrap();
        let taxonomy = env.write_taxonomy(&bird_records()).unwrap();
        let scores = env.write_scores("scores.json", &bird_scores()).unwrap();

        assert_eq!(taxonomy, env.data_dir().join("taxonomy.json"));
        let decoded: Vec<f64> =
            serde_json::from_slice(&std::fs::read(scores).unwrap()).unwrap();
        assert_eq!(decoded.len(), bird_scores().len());
    }

    #[test]
    fn test_vars_point_into_root() {
        let env = TestEnvironment::new().unwrap();
        for (_, value) in env.vars() {
            assert!(Path::new(&value).starts_with(env.root()));
        }
    }
}
