#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary under test, isolated from the user's real config directory.
pub fn sk() -> Command {
    let mut cmd = cargo_bin_cmd!("shiftkeeper");
    cmd.env("SHIFTKEEPER_HOME", env::temp_dir().join("shiftkeeper_test_home"));
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shiftkeeper.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Run a command against `db_path` in test mode and require success.
pub fn run_ok(db_path: &str, args: &[&str]) {
    sk().args(["--db", db_path, "--test"])
        .args(args)
        .assert()
        .success();
}

/// Initialize the DB and register employee `E1`.
pub fn init_db_with_employee(db_path: &str) {
    run_ok(db_path, &["init"]);
    run_ok(db_path, &["employee", "add", "E1", "--name", "Anna Rossi"]);
}

/// `init_db_with_employee` plus the 2025-11-10 17:00-22:00 shift (#1).
pub fn init_db_with_shift(db_path: &str) {
    init_db_with_employee(db_path);
    run_ok(
        db_path,
        &["shift", "add", "E1", "2025-11-10", "--start", "17:00", "--end", "22:00"],
    );
}
