#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn mindvault_cmd() -> Command {
    let mut cmd = Command::cargo_bin("mindvault").unwrap();
    cmd.env_remove("MINDVAULT_ROOT");
    cmd.env_remove("MINDVAULT_LOG");
    cmd
}

/// Initialize a vault at `path`
pub fn init_vault(path: &Path) {
    mindvault_cmd().arg("init").arg(path).assert().success();
}

/// Create an entry in the vault at `path` and return its id
pub fn new_entry(path: &Path, args: &[&str]) -> String {
    let output = mindvault_cmd()
        .current_dir(path)
        .arg("new")
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "new failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .trim()
        .strip_prefix("Saved entry ")
        .expect("unexpected output from new")
        .to_string()
}
