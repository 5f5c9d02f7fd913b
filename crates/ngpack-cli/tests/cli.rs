//! Integration tests for the `ngpack` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn ngpack() -> Command {
    let mut cmd = Command::cargo_bin("ngpack").unwrap();
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

fn project(options: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("node_modules")).unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("build.json"), options).unwrap();
    fs::write(dir.path().join(".browserslistrc"), "last 2 Chrome versions\n").unwrap();
    dir
}

fn assemble(dir: &Path) -> Command {
    let mut cmd = ngpack();
    cmd.arg("assemble")
        .arg("--options")
        .arg(dir.join("build.json"))
        .arg("--workspace-root")
        .arg(dir);
    cmd
}

#[test]
#[serial]
fn assemble_prints_configuration() {
    let dir = project(r#"{ "main": "src/main.ts", "aot": true }"#);

    assemble(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"development\""))
        .stdout(predicate::str::contains("src/main.ts"))
        .stdout(predicate::str::contains("hashed-module-ids"));
}

#[test]
#[serial]
fn assemble_writes_output_file() {
    let dir = project(r#"{ "main": "src/main.ts", "optimization": true, "outputHashing": "all" }"#);
    let out = dir.path().join("out/bundler.json");

    assemble(dir.path())
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Configuration written to"));

    let config: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(config["mode"], "production");
    assert_eq!(config["output"]["filename"], "[name].[chunkhash:20].js");
}

#[test]
#[serial]
fn quiet_suppresses_status_messages() {
    let dir = project(r#"{ "main": "src/main.ts" }"#);
    let out = dir.path().join("bundler.json");

    assemble(dir.path())
        .arg("--quiet")
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
    assert!(out.is_file());
}

#[test]
#[serial]
fn string_assets_follow_source_root() {
    let dir = project(r#"{ "main": "app/main.ts", "assets": ["app/static", "app/robots.txt"] }"#);
    fs::create_dir_all(dir.path().join("app/static")).unwrap();
    fs::write(dir.path().join("app/robots.txt"), "").unwrap();

    let output = assemble(dir.path())
        .arg("--source-root")
        .arg("app")
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let copy = config["plugins"]
        .as_array()
        .unwrap()
        .iter()
        .find(|plugin| plugin["plugin"] == "copy")
        .unwrap();
    assert_eq!(copy["patterns"][0]["to"], "static/");
    assert_eq!(copy["patterns"][0]["from"]["glob"], "**/*");
    assert_eq!(copy["patterns"][1]["to"], "");
    assert_eq!(copy["patterns"][1]["from"]["glob"], "robots.txt");

    assemble(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("source root"));
}

#[test]
#[serial]
fn assemble_reads_tsconfig_from_project_root() {
    let dir = project(r#"{ "main": "src/main.ts", "esVersionInFileName": true }"#);
    fs::write(
        dir.path().join("tsconfig.json"),
        r#"{ "compilerOptions": { "target": "es2015", "baseUrl": "./src" } }"#,
    )
    .unwrap();

    let output = assemble(dir.path()).output().unwrap();
    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["output"]["filename"], "[name]-es2015.js");
    assert!(config["resolve"]["modules"][0].as_str().unwrap().ends_with("/src"));
}

#[test]
#[serial]
fn mixed_script_injection_fails() {
    let dir = project(
        r#"{
            "main": "src/main.ts",
            "scripts": [
                { "input": "src/a.js", "bundleName": "vendor" },
                { "input": "src/b.js", "bundleName": "vendor", "inject": false }
            ]
        }"#,
    );

    assemble(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("vendor"))
        .stderr(predicate::str::contains("mixing injected"));
}

#[test]
#[serial]
fn missing_dependency_directory_fails() {
    let dir = project(r#"{ "main": "src/main.ts" }"#);
    fs::remove_dir(dir.path().join("node_modules")).unwrap();
    // A stray node_modules above the temp dir would be found instead
    if dir.path().ancestors().skip(1).any(|a| a.join("node_modules").exists()) {
        return;
    }

    assemble(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("node_modules"));
}

#[test]
#[serial]
fn environment_overrides_options() {
    let dir = project(r#"{ "main": "src/main.ts", "aot": false }"#);

    let output = assemble(dir.path()).env("NGPACK_AOT", "true").output().unwrap();
    assert!(output.status.success());
    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(config["entry"].get("polyfills").is_none());

    let output = assemble(dir.path())
        .env("NGPACK_AOT", "true")
        .arg("--no-env")
        .output()
        .unwrap();
    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(config["entry"].get("polyfills").is_some());
}

#[test]
#[serial]
fn check_accepts_valid_options() {
    let dir = project(r#"{ "main": "src/main.ts" }"#);

    ngpack()
        .arg("check")
        .arg("--options")
        .arg(dir.path().join("build.json"))
        .assert()
        .success()
        .stderr(predicate::str::contains("is valid"));
}

#[test]
#[serial]
fn check_rejects_invalid_options() {
    let dir = project(r#"{ "main": "src/main.ts", "poll": 0 }"#);

    ngpack()
        .arg("check")
        .arg("--options")
        .arg(dir.path().join("build.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("poll"));
}

#[test]
#[serial]
fn check_reports_missing_file() {
    ngpack()
        .arg("check")
        .arg("--options")
        .arg("does-not-exist.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
