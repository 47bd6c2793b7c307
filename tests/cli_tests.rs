use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

const PEOPLE: &str = "name,age,city\nJohn,25,New York\nJane,abc,Boston\nJoe,41,Chicago\n";

fn write_input(dir: &tempfile::TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_valid_rules() {
    cargo_bin_cmd!("fractal")
        .args(["check", "age  TYPE INT AND city REQUIRED, name REQUIRED"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 rules OK"))
        .stdout(predicate::str::contains(
            "age TYPE INT AND city REQUIRED, name REQUIRED",
        ));
}

#[test]
fn test_check_tokens() {
    cargo_bin_cmd!("fractal")
        .args(["check", "--tokens", "age RANGE (18,30)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CONDITION  RANGE"))
        .stdout(predicate::str::contains("VALUE      (18,30)"));
}

#[test]
fn test_check_ast() {
    cargo_bin_cmd!("fractal")
        .args(["check", "--ast", "name REQUIRED"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Omitted"));
}

#[test]
fn test_check_invalid_rules() {
    cargo_bin_cmd!("fractal")
        .args(["check", "age TYPE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected value after condition TYPE"));
}

// ============================================================================
// run
// ============================================================================

#[test]
fn test_run_aborts_on_invalid_record() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "people.csv", PEOPLE);

    cargo_bin_cmd!("fractal")
        .args(["run", "--input", &input, "--validate", "age TYPE INT"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3: value 'abc' is not of type INT"));
}

#[test]
fn test_run_skip_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "people.csv", PEOPLE);

    cargo_bin_cmd!("fractal")
        .args([
            "run",
            "--input",
            &input,
            "--validate",
            "age TYPE INT",
            "--skip-invalid",
        ])
        .assert()
        .success()
        .stdout("name,age,city\nJohn,25,New York\nJoe,41,Chicago\n");
}

#[test]
fn test_run_reads_stdin() {
    cargo_bin_cmd!("fractal")
        .args(["run", "--validate", "age RANGE (18,30)", "--skip-invalid"])
        .write_stdin(PEOPLE)
        .assert()
        .success()
        .stdout("name,age,city\nJohn,25,New York\n");
}

#[test]
fn test_run_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "people.csv", PEOPLE);

    let output = cargo_bin_cmd!("fractal")
        .args(["run", "-i", &input, "--validate", "age TYPE INT", "--skip-invalid", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["records"], 3);
    assert_eq!(report["accepted"], 2);
    assert_eq!(report["rejected"][0]["line"], 3);
}

#[test]
fn test_run_with_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "people.tsv", "name\tage\nJohn\t25\nJane\tabc\n");
    let config = write_input(
        &dir,
        "fractal.json",
        r#"{ "delimiter": "\t", "on_error": "skip", "validation_rules": "age TYPE INT" }"#,
    );

    cargo_bin_cmd!("fractal")
        .args(["run", "--input", &input, "--config", &config])
        .assert()
        .success()
        .stdout("name\tage\nJohn\t25\n");
}

#[test]
fn test_run_flags_override_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "people.csv", PEOPLE);
    let config = write_input(&dir, "fractal.json", r#"{ "validation_rules": "age TYPE BOOL" }"#);

    cargo_bin_cmd!("fractal")
        .args([
            "run",
            "--input",
            &input,
            "--config",
            &config,
            "--validate",
            "name REQUIRED",
        ])
        .assert()
        .success()
        .stdout(PEOPLE);
}

#[test]
fn test_run_rules_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "people.csv", PEOPLE);

    cargo_bin_cmd!("fractal")
        .env("FRACTAL_VALIDATION_RULES", "age TYPE INT")
        .args(["run", "--input", &input])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3"));
}

#[test]
fn test_run_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "people.csv", PEOPLE);
    let missing = dir.path().join("nope.json");

    cargo_bin_cmd!("fractal")
        .args(["run", "--input", &input, "--config", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}

// ============================================================================
// docs
// ============================================================================

#[test]
fn test_docs_overview() {
    cargo_bin_cmd!("fractal")
        .arg("docs")
        .assert()
        .success()
        .stdout(predicate::str::contains("DOCUMENTATION TOPICS"));
}

#[test]
fn test_docs_topic() {
    cargo_bin_cmd!("fractal")
        .args(["docs", "conditions"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("CONDITIONS"));
}

#[test]
fn test_docs_logical_describes_not_chains() {
    cargo_bin_cmd!("fractal")
        .args(["docs", "logical"])
        .assert()
        .success()
        .stdout(predicate::str::contains("in a NOT b AND c, c is never checked"));
}

#[test]
fn test_check_warns_about_chain_after_not() {
    cargo_bin_cmd!("fractal")
        .args(["check", "age TYPE BOOL NOT name REQUIRED AND zip TYPE INT"])
        .assert()
        .success()
        .stderr(predicate::str::contains("never checked"));
}

#[test]
fn test_docs_unknown_topic() {
    cargo_bin_cmd!("fractal")
        .args(["docs", "queues"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown topic: 'queues'"));
}
