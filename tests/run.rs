use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::fs;

fn command(temp: &assert_fs::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("disco").expect("binary exists");
    cmd.env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.child("config").path())
        .env("PATH", "")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn run_rejects_both_image_targets() {
    let temp = assert_fs::TempDir::new().unwrap();

    command(&temp)
        .arg("run")
        .arg("--image-file")
        .arg("image.tar")
        .arg("--image-uri")
        .arg("nginx:1.25")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to run app"))
        .stderr(predicate::str::contains("only one of image file or image URI can be specified"));
}

#[test]
fn run_image_uri_writes_yaml_report() {
    let temp = assert_fs::TempDir::new().unwrap();
    let output = temp.child("reports/out.yaml");

    command(&temp)
        .arg("run")
        .arg("--project")
        .arg("p1")
        .arg("--image-uri")
        .arg("nginx:1.25")
        .arg("--format")
        .arg("yaml")
        .arg("-o")
        .arg(output.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to ~/reports/out.yaml"));

    output.assert(predicate::str::contains("project_id: p1"));
    output.assert(predicate::str::contains("reference: nginx:1.25"));
    output.assert(predicate::str::contains("source: uri"));
}

#[test]
fn run_unknown_format_warns_and_writes_json() {
    let temp = assert_fs::TempDir::new().unwrap();
    let output = temp.child("out.report");

    command(&temp)
        .arg("run")
        .arg("--image-uri")
        .arg("nginx:1.25")
        .arg("--format")
        .arg("xml")
        .arg("--output")
        .arg(output.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("unsupported output format: xml"));

    let contents = fs::read_to_string(output.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(value["images"][0]["reference"], "nginx:1.25");
}

#[test]
fn run_without_runtimes_prints_empty_report() {
    let temp = assert_fs::TempDir::new().unwrap();

    let assert = command(&temp).arg("run").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["images"], serde_json::json!([]));
}

#[test]
fn run_missing_image_file_fails() {
    let temp = assert_fs::TempDir::new().unwrap();

    command(&temp)
        .arg("run")
        .arg("--image-file")
        .arg(temp.child("missing.tar").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to run app"))
        .stderr(predicate::str::contains("missing.tar"));
}

#[test]
fn run_image_file_is_reported() {
    let temp = assert_fs::TempDir::new().unwrap();
    let archive = temp.child("image.tar");
    archive.write_binary(b"archive").unwrap();

    command(&temp)
        .arg("run")
        .arg("--image-file")
        .arg(archive.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"source\": \"file\""))
        .stdout(predicate::str::contains("image.tar"));
}

#[test]
fn config_supplies_defaults() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("config/disco/config.toml")
        .write_str("project = \"from-config\"\nformat = \"yaml\"\noutput = \"~/disco.yaml\"\n")
        .unwrap();

    command(&temp)
        .arg("run")
        .arg("--image-uri")
        .arg("redis:7")
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to ~/disco.yaml"));

    temp.child("disco.yaml").assert(predicate::str::contains("project_id: from-config"));
}

#[test]
fn invalid_config_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("config/disco/config.toml").write_str("exclude = [\"nginx[\"]\n").unwrap();

    command(&temp)
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid exclude pattern"));
}

#[test]
fn run_output_flag_expands_home() {
    let temp = assert_fs::TempDir::new().unwrap();

    command(&temp)
        .arg("run")
        .arg("--image-uri")
        .arg("nginx:1.25")
        .arg("--output")
        .arg("~/reports/out.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to ~/reports/out.json"));

    temp.child("reports/out.json").assert(predicate::str::contains("nginx:1.25"));
}
