use std::path::Path;
use std::process::{Command, Output};

fn readmekit(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_readmekit"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("readmekit should run")
}

#[test]
fn test_build_writes_default_readme() {
    let dir = tempfile::tempdir().unwrap();

    let output = readmekit(dir.path(), &["build"]);
    assert!(output.status.success(), "build failed: {:?}", output);

    let readme = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
    assert!(readme.starts_with("# Project Title"));
    assert!(readme.ends_with("see the LICENSE.md file for details."));
}

#[test]
fn test_build_stdout_matches_file_export() {
    let dir = tempfile::tempdir().unwrap();

    let printed = readmekit(dir.path(), &["build", "--stdout"]);
    assert!(printed.status.success());
    readmekit(dir.path(), &["build", "-o", "out/README.md"]);

    let written = std::fs::read(dir.path().join("out/README.md")).unwrap();
    assert_eq!(printed.stdout, written);
}

#[test]
fn test_build_applies_plan() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("plan.toml"),
        r###"
[[operation]]
op = "clean_start"

[[operation]]
op = "add"
title = "Intro"
content = "# Intro"

[[operation]]
op = "add"
title = "Usage"
content = "## Usage"

[[operation]]
op = "delete"
id = "does-not-exist"
"###,
    )
    .unwrap();

    let output = readmekit(dir.path(), &["build", "--plan", "plan.toml"]);
    assert!(output.status.success(), "build failed: {:?}", output);

    let readme = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
    assert_eq!(readme, "# Intro\n\n## Usage");
}

#[test]
fn test_build_uses_project_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("readmekit.toml"),
        "output = \"docs/README.md\"\nclean_start = true\n",
    )
    .unwrap();

    let output = readmekit(dir.path(), &["build"]);
    assert!(output.status.success(), "build failed: {:?}", output);

    let readme = std::fs::read_to_string(dir.path().join("docs/README.md")).unwrap();
    assert_eq!(readme, "");
}

#[test]
fn test_build_import_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let source = "# Tool\n\nDoes things.\n\n## License\n\nMIT";
    std::fs::write(dir.path().join("OLD.md"), source).unwrap();

    let output = readmekit(dir.path(), &["build", "--import", "OLD.md"]);
    assert!(output.status.success(), "build failed: {:?}", output);

    let readme = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
    assert_eq!(readme, source);
}

#[test]
fn test_bad_plan_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("plan.toml"), "[[operation]]\nop = \"explode\"\n").unwrap();

    let output = readmekit(dir.path(), &["build", "--plan", "plan.toml"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to load plan"));
}

#[test]
fn test_catalog_search() {
    let dir = tempfile::tempdir().unwrap();

    let output = readmekit(dir.path(), &["catalog", "--search", "licen"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("* license"));
    assert!(!stdout.contains("usage"));
}

#[test]
fn test_init_writes_config_used_by_build() {
    let dir = tempfile::tempdir().unwrap();

    let output = readmekit(dir.path(), &["init", "-o", "docs/README.md", "--clean"]);
    assert!(output.status.success(), "init failed: {:?}", output);

    let config = std::fs::read_to_string(dir.path().join("readmekit.toml")).unwrap();
    assert!(config.contains("clean_start = true"));

    let output = readmekit(dir.path(), &["build"]);
    assert!(output.status.success(), "build failed: {:?}", output);
    let readme = std::fs::read_to_string(dir.path().join("docs/README.md")).unwrap();
    assert_eq!(readme, "");
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("readmekit.toml"), "clean_start = true\n").unwrap();

    let output = readmekit(dir.path(), &["init"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("--force"));

    let output = readmekit(dir.path(), &["init", "--force"]);
    assert!(output.status.success(), "init failed: {:?}", output);
    let config = std::fs::read_to_string(dir.path().join("readmekit.toml")).unwrap();
    assert!(config.contains("clean_start = false"));
}
