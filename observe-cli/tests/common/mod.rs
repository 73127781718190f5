#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use observe_data::ClassifierOutput;
use observe_test::{bird_records, bird_scores, TestEnvironment};
use std::path::PathBuf;

pub use observe_test::TestEnvironment as Env;

/// `observe` binary pointed at an isolated home directory
pub fn observe_cmd(env: &TestEnvironment) -> Command {
    let mut cmd = Command::cargo_bin("observe").unwrap();
    cmd.envs(env.vars())
        .env("NO_COLOR", "1")
        .env_remove("OBSERVE_LOG")
        .env_remove("OBSERVE_CONFIG");
    cmd
}

/// Environment holding the bird taxonomy and its sample scores
pub struct BirdFixture {
    pub env: TestEnvironment,
    pub taxonomy: PathBuf,
    pub scores: PathBuf,
}

impl BirdFixture {
    pub fn new() -> Result<Self> {
        let env = TestEnvironment::new()?;
        let taxonomy = env.write_taxonomy(&bird_records())?;
        let scores = env.write_scores("scores.json", &bird_scores())?;
        Ok(Self {
            env,
            taxonomy,
            scores,
        })
    }

    pub fn write_scores(&self, name: &str, values: Vec<f64>) -> Result<PathBuf> {
        self.env.write_scores(name, &ClassifierOutput::new(values))
    }

    pub fn cmd(&self) -> Command {
        observe_cmd(&self.env)
    }
}
