use std::fs;
use std::process::Command;

use tempfile::tempdir;

fn run(dir: &std::path::Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_barrelsmith"))
        .current_dir(dir)
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

#[test]
fn init_writes_starter_config() {
    let dir = tempdir().unwrap();
    let output = run(dir.path(), &["init"]);
    assert!(output.status.success(), "{output:?}");

    let config = fs::read_to_string(dir.path().join("barrelsmith.toml")).unwrap();
    assert!(config.contains("[[rules]]"));
    assert!(config.contains("dirs = \"src/**\""));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Created barrelsmith.toml"));
    assert!(stdout.contains("barrelsmith generate"));
}

#[test]
fn init_refuses_to_overwrite() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("barrelsmith.toml"), "# mine\n").unwrap();

    let output = run(dir.path(), &["init"]);
    assert!(!output.status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("barrelsmith.toml")).unwrap(),
        "# mine\n"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already exists"));
}

#[test]
fn init_force_overwrites() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("barrelsmith.toml"), "# mine\n").unwrap();

    let output = run(dir.path(), &["init", "--force"]);
    assert!(output.status.success());
    let config = fs::read_to_string(dir.path().join("barrelsmith.toml")).unwrap();
    assert!(config.contains("[[rules]]"));
}

#[test]
fn starter_config_generates_cleanly() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/a.ts"), "").unwrap();
    assert!(run(dir.path(), &["init"]).status.success());

    let output = run(dir.path(), &["generate"]);
    assert!(output.status.success(), "{output:?}");
    assert!(dir.path().join("src/index.ts").exists());
}
