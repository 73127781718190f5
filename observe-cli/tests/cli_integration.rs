mod common;

use anyhow::Result;
use predicates::prelude::*;

use common::*;

#[test]
fn test_cli_help_command() -> Result<()> {
    let env = Env::new()?;
    observe_cmd(&env)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("identify"))
        .stdout(predicate::str::contains("lineage"))
        .stdout(predicate::str::contains("stats"));
    Ok(())
}

#[test]
fn test_cli_version_command() -> Result<()> {
    let env = Env::new()?;
    observe_cmd(&env)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("observe"));
    Ok(())
}

#[test]
fn test_identify_text() -> Result<()> {
    let fixture = BirdFixture::new()?;

    fixture
        .cmd()
        .arg("identify")
        .arg("--taxonomy")
        .arg(&fixture.taxonomy)
        .arg("--scores")
        .arg(&fixture.scores)
        .assert()
        .success()
        .stdout(predicate::str::contains("Best match: American Robin"))
        .stdout(predicate::str::contains("Corvus brachyrhynchos"))
        .stdout(predicate::str::contains("50.00%"));

    Ok(())
}

#[test]
fn test_identify_json_ranking() -> Result<()> {
    let fixture = BirdFixture::new()?;

    let output = fixture
        .cmd()
        .args(["identify", "--format", "json", "--top", "2"])
        .arg("--taxonomy")
        .arg(&fixture.taxonomy)
        .arg("--scores")
        .arg(&fixture.scores)
        .output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let candidates = report["candidates"].as_array().unwrap();
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0]["taxonId"], 1000);
    assert_eq!(candidates[1]["taxonId"], 1101);
    assert_eq!(report["best"]["english"], "American Robin");
    assert!((report["total"].as_f64().unwrap() - 1.0).abs() < 1e-9);

    Ok(())
}

#[test]
fn test_identify_at_rank() -> Result<()> {
    let fixture = BirdFixture::new()?;

    let output = fixture
        .cmd()
        .args(["identify", "--format", "json", "--rank", "30"])
        .arg("--taxonomy")
        .arg(&fixture.taxonomy)
        .arg("--scores")
        .arg(&fixture.scores)
        .output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let names: Vec<&str> = report["candidates"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Turdidae", "Corvidae"]);

    Ok(())
}

#[test]
fn test_identify_batch() -> Result<()> {
    let fixture = BirdFixture::new()?;
    let second = fixture.write_scores("second.json", vec![0.0, 0.0, 0.9, 0.05, 0.05])?;

    let output = fixture
        .cmd()
        .args(["identify", "--format", "json", "-j", "2"])
        .arg("--taxonomy")
        .arg(&fixture.taxonomy)
        .arg("--scores")
        .arg(&fixture.scores)
        .arg("--scores")
        .arg(&second)
        .output()?;
    assert!(output.status.success());

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[1]["best"]["name"], "Corvus corax");

    Ok(())
}

#[test]
fn test_identify_with_tree() -> Result<()> {
    let fixture = BirdFixture::new()?;

    fixture
        .cmd()
        .args(["identify", "--tree", "--depth", "1", "--locale", "fr"])
        .arg("--taxonomy")
        .arg(&fixture.taxonomy)
        .arg("--scores")
        .arg(&fixture.scores)
        .assert()
        .success()
        .stdout(predicate::str::contains("Merle d'Amérique"))
        .stdout(predicate::str::contains("├── Turdidae [30] 0.5500"))
        .stdout(predicate::str::contains("... (2 children)"));

    Ok(())
}

#[test]
fn test_lineage_text_and_json() -> Result<()> {
    let fixture = BirdFixture::new()?;

    fixture
        .cmd()
        .args(["lineage", "1110"])
        .arg("--taxonomy")
        .arg(&fixture.taxonomy)
        .assert()
        .success()
        .stdout(predicate::str::contains("Corvidae"))
        .stdout(predicate::str::contains("Eurasian Magpie"));

    let output = fixture
        .cmd()
        .args(["lineage", "1110", "--format", "json"])
        .arg("--taxonomy")
        .arg(&fixture.taxonomy)
        .output()?;
    let lineage: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let ids: Vec<u64> = lineage
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|step| step["taxonId"].as_u64())
        .collect();
    assert_eq!(ids, vec![1, 11, 111, 1110]);

    Ok(())
}

#[test]
fn test_stats() -> Result<()> {
    let fixture = BirdFixture::new()?;

    fixture
        .cmd()
        .args(["stats", "--tree"])
        .arg("--taxonomy")
        .arg(&fixture.taxonomy)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Taxa: 11"))
        .stdout(predicate::str::contains("Classifier Output Length: 5"))
        .stdout(predicate::str::contains("└── Pica pica [10]"));

    let output = fixture
        .cmd()
        .args(["stats", "--format", "json"])
        .arg("--taxonomy")
        .arg(&fixture.taxonomy)
        .output()?;
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(stats["leaf_count"], 5);
    assert_eq!(stats["max_depth"], 3);

    Ok(())
}

#[test]
fn test_taxonomy_from_default_location() -> Result<()> {
    // BirdFixture writes OBSERVE_DATA_DIR/taxonomy.json
    let fixture = BirdFixture::new()?;

    fixture
        .cmd()
        .args(["stats", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_taxa\": 11"));

    Ok(())
}

#[test]
fn test_config_init_and_show() -> Result<()> {
    let env = Env::new()?;

    observe_cmd(&env)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default configuration"));
    assert!(env.config_path().exists());

    observe_cmd(&env)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    observe_cmd(&env)
        .args(["config", "show", "--paths"])
        .assert()
        .success()
        .stdout(predicate::str::contains("top_n = 5"))
        .stdout(predicate::str::contains("policy = \"expiring\""))
        .stdout(predicate::str::contains("Observe Paths:"));

    Ok(())
}

#[test]
fn test_config_applies_to_identify() -> Result<()> {
    let fixture = BirdFixture::new()?;
    let config = fixture.env.write_file(
        "custom.toml",
        b"[classification]\ntop_n = 1\nrank = 20\n",
    )?;

    let output = fixture
        .cmd()
        .arg("--config")
        .arg(&config)
        .args(["identify", "--format", "json"])
        .arg("--scores")
        .arg(&fixture.scores)
        .output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let candidates = report["candidates"].as_array().unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0]["name"], "Turdus");

    Ok(())
}
