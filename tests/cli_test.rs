#![cfg(unix)]

use std::path::Path;
use std::process::{Command, Output, Stdio};

/// A vault holding `names`, with a config that lets `true` stand in for the utility.
/// `None` if the platform reports no birth times.
fn vault_with(names: &[&str]) -> Option<tempfile::TempDir> {
    let dir = tempfile::tempdir().unwrap();

    for name in names {
        let file_path = dir.path().join(name);
        std::fs::write(&file_path, "# note").unwrap();
        if std::fs::metadata(&file_path).unwrap().created().is_err() {
            return None;
        }
    }

    let config = format!(
        "utility = \"true\"\nlog_dir = {:?}\n",
        dir.path().display().to_string()
    );
    std::fs::write(dir.path().join("mtime2created.toml"), config).unwrap();
    Some(dir)
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mtime2created"))
        .arg("--config")
        .arg(dir.join("mtime2created.toml"))
        .arg("--vault")
        .arg(dir)
        .args(["--lang", "en"])
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .unwrap()
}

#[test]
fn batch_summary_reaches_a_piped_stdout() {
    let Some(dir) = vault_with(&["a.md", "b.md"]) else {
        return;
    };

    let output = run(dir.path(), &["sync", "a.md", "b.md"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Done: 2, Failed: 0"), "stdout: {}", stdout);
}

#[test]
fn single_file_notice_reaches_a_piped_stdout() {
    let Some(dir) = vault_with(&["a.md"]) else {
        return;
    };

    let output = run(dir.path(), &["sync", "a.md"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Synced modification time to creation time"),
        "stdout: {}",
        stdout
    );
}

#[test]
fn writing_the_example_config_is_confirmed() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("new.toml");

    let output = Command::new(env!("CARGO_BIN_EXE_mtime2created"))
        .arg("--config")
        .arg(&config_path)
        .args(["config", "example", "write"])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Example config written to"), "stdout: {}", stdout);
    assert!(config_path.exists());
}
