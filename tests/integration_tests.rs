//! Integration tests for the bump-version binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn temp_project(version: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join(".project-root"), "").unwrap();
    fs::write(
        root.join("Cargo.toml"),
        format!("[package]\nname = \"demo\"\nversion = \"{version}\"\nedition = \"2024\"\n"),
    )
    .unwrap();
    fs::write(
        root.join("src/lib.rs"),
        format!("/// Version information\npub const VERSION: &str = \"{version}\";\n"),
    )
    .unwrap();
    temp_dir
}

fn declared_versions(root: &Path) -> (String, String) {
    (
        fs::read_to_string(root.join("Cargo.toml")).unwrap(),
        fs::read_to_string(root.join("src/lib.rs")).unwrap(),
    )
}

fn bump_version() -> Command {
    let mut cmd = Command::cargo_bin("bump-version").unwrap();
    cmd.env_remove("RUTILS_LOG").env_remove("RUTILS_CONFIG");
    cmd
}

#[test]
fn test_cli_help() {
    bump_version()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("major"))
        .stdout(predicate::str::contains("patch"));
}

#[test]
fn test_cli_version() {
    bump_version()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_bump_each_kind() {
    for (kind, expected) in [("major", "2.0.0"), ("minor", "1.3.0"), ("patch", "1.2.4")] {
        let project = temp_project("1.2.3");

        bump_version()
            .current_dir(project.path())
            .arg(kind)
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let (manifest, lib) = declared_versions(project.path());
        assert!(
            manifest.contains(&format!("version = \"{expected}\"")),
            "{kind}: {manifest}"
        );
        assert!(manifest.contains("edition = \"2024\""));
        assert_eq!(
            lib,
            format!("/// Version information\npub const VERSION: &str = \"{expected}\";\n")
        );
    }
}

#[test]
fn test_bump_from_subdirectory_uses_project_root() {
    let project = temp_project("0.9.9");

    bump_version()
        .current_dir(project.path().join("src"))
        .arg("patch")
        .assert()
        .success();

    let (manifest, _) = declared_versions(project.path());
    assert!(manifest.contains("version = \"0.9.10\""));
}

#[test]
fn test_directory_flag() {
    let project = temp_project("3.0.0");

    bump_version()
        .arg("-C")
        .arg(project.path())
        .arg("minor")
        .assert()
        .success();

    let (_, lib) = declared_versions(project.path());
    assert!(lib.contains("\"3.1.0\""));
}

#[test]
fn test_project_config_selects_targets() {
    let project = temp_project("1.0.0");
    fs::write(project.path().join("VERSION.txt"), "release = \"1.0.0\"\n").unwrap();
    fs::write(
        project.path().join("rutils.toml"),
        "[version]\ntargets = [{ path = \"VERSION.txt\", prefix = 'release = \"' }]\n",
    )
    .unwrap();

    bump_version()
        .current_dir(project.path())
        .arg("major")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(project.path().join("VERSION.txt")).unwrap(),
        "release = \"2.0.0\"\n"
    );
    // Default targets are replaced, not extended
    let (manifest, _) = declared_versions(project.path());
    assert!(manifest.contains("version = \"1.0.0\""));
}

#[test]
fn test_config_file_from_environment() {
    let project = temp_project("1.0.0");
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("release.toml");
    fs::write(project.path().join("VERSION.txt"), "release = \"1.0.0\"\n").unwrap();
    fs::write(
        &config_path,
        "[version]\ntargets = [{ path = \"VERSION.txt\", prefix = 'release = \"' }]\n",
    )
    .unwrap();

    bump_version()
        .current_dir(project.path())
        .env("RUTILS_CONFIG", &config_path)
        .arg("patch")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(project.path().join("VERSION.txt")).unwrap(),
        "release = \"1.0.1\"\n"
    );
    let (manifest, _) = declared_versions(project.path());
    assert!(manifest.contains("version = \"1.0.0\""));
}

#[test]
fn test_failed_bump_writes_nothing() {
    let project = temp_project("1.2.3");
    fs::write(
        project.path().join("src/lib.rs"),
        "pub const VERSION: &str = \"1.2\";\n",
    )
    .unwrap();

    bump_version()
        .current_dir(project.path())
        .arg("patch")
        .assert()
        .failure();

    let (manifest, _) = declared_versions(project.path());
    assert!(manifest.contains("version = \"1.2.3\""));
}

#[test]
fn test_invalid_kind_is_usage_error() {
    let project = temp_project("1.2.3");

    bump_version()
        .current_dir(project.path())
        .arg("huge")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));

    let (manifest, _) = declared_versions(project.path());
    assert!(manifest.contains("version = \"1.2.3\""));
}

#[test]
fn test_missing_kind_is_usage_error() {
    bump_version().assert().code(2);
}

#[test]
fn test_malformed_version_fails() {
    let project = temp_project("1.2");

    bump_version()
        .current_dir(project.path())
        .arg("patch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("MAJOR.MINOR.PATCH"));
}

#[test]
fn test_unmatched_target_is_left_alone() {
    let project = temp_project("1.2.3");
    fs::write(project.path().join("src/lib.rs"), "// no version here\n").unwrap();

    bump_version()
        .current_dir(project.path())
        .arg("patch")
        .assert()
        .success()
        .stderr(predicate::str::contains("No line starting with"));

    let (manifest, lib) = declared_versions(project.path());
    assert!(manifest.contains("version = \"1.2.4\""));
    assert_eq!(lib, "// no version here\n");
}
