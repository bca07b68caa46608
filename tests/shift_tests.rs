mod common;
use common::{init_db_with_employee, init_db_with_shift, run_ok, setup_test_db, sk};
use predicates::str::contains;

#[test]
fn test_shift_add_reports_planned_hours() {
    let db_path = setup_test_db("shift_add");
    init_db_with_employee(&db_path);

    sk().args([
        "--db", &db_path, "--test", "shift", "add", "E1", "2025-11-10", "--start", "08:30",
        "--end", "12:45",
    ])
    .assert()
    .success()
    .stdout(contains("Shift #1 planned for E1 on 2025-11-10 08:30-12:45 (4.25h)."));
}

#[test]
fn test_shift_rejects_inverted_window() {
    let db_path = setup_test_db("shift_inverted");
    init_db_with_employee(&db_path);

    sk().args([
        "--db", &db_path, "--test", "shift", "add", "E1", "2025-11-10", "--start", "22:00",
        "--end", "17:00",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid shift"));
}

#[test]
fn test_shift_for_unknown_employee_is_rejected() {
    let db_path = setup_test_db("shift_unknown_emp");
    init_db_with_employee(&db_path);

    sk().args([
        "--db", &db_path, "--test", "shift", "add", "E9", "2025-11-10", "--start", "08:00",
        "--end", "12:00",
    ])
    .assert()
    .failure()
    .stderr(contains("Unknown employee: E9"));
}

#[test]
fn test_shift_edit_reschedules() {
    let db_path = setup_test_db("shift_edit");
    init_db_with_shift(&db_path);

    sk().args([
        "--db", &db_path, "--test", "shift", "edit", "1", "--start", "18:00", "--status",
        "confirmed",
    ])
    .assert()
    .success()
    .stdout(contains("Shift #1 updated: 2025-11-10 18:00-22:00 [confirmed]."));

    sk().args(["--db", &db_path, "--test", "shift", "list", "--period", "2025-11"])
        .assert()
        .success()
        .stdout(contains("4.00h"));
}

#[test]
fn test_shift_edit_rejects_unknown_status() {
    let db_path = setup_test_db("shift_edit_status");
    init_db_with_shift(&db_path);

    sk().args(["--db", &db_path, "--test", "shift", "edit", "1", "--status", "done"])
        .assert()
        .failure()
        .stderr(contains("Invalid shift status: done"));
}

#[test]
fn test_cancel_and_pending_filter() {
    let db_path = setup_test_db("shift_cancel");
    init_db_with_shift(&db_path);
    run_ok(
        &db_path,
        &["shift", "add", "E1", "2025-11-11", "--start", "08:00", "--end", "12:00"],
    );

    sk().args(["--db", &db_path, "--test", "shift", "cancel", "1"])
        .assert()
        .success()
        .stdout(contains("Shift #1 is cancelled."));

    let out = sk()
        .args([
            "--db", &db_path, "--test", "shift", "list", "--period", "2025-11", "--pending",
        ])
        .output()
        .expect("run shift list");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("2025-11-11"), "{stdout}");
    assert!(!stdout.contains("2025-11-10"), "{stdout}");
}

#[test]
fn test_completed_shift_cannot_be_cancelled() {
    let db_path = setup_test_db("shift_cancel_completed");
    init_db_with_shift(&db_path);
    run_ok(&db_path, &["clock", "in", "E1", "--at", "2025-11-10 17:00"]);
    run_ok(&db_path, &["clock", "out", "E1", "--at", "2025-11-10 22:00"]);

    sk().args(["--db", &db_path, "--test", "shift", "cancel", "1"])
        .assert()
        .failure()
        .stderr(contains("Invalid shift"));
}

#[test]
fn test_shift_delete() {
    let db_path = setup_test_db("shift_delete");
    init_db_with_shift(&db_path);
    run_ok(&db_path, &["shift", "del", "1"]);

    sk().args(["--db", &db_path, "--test", "shift", "del", "1"])
        .assert()
        .failure()
        .stderr(contains("Shift #1 not found"));
}
