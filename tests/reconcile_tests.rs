mod common;
use common::{init_db_with_employee, init_db_with_shift, run_ok, setup_test_db, sk};
use predicates::str::contains;

fn shift_list(db_path: &str) -> String {
    let out = sk()
        .args([
            "--db", db_path, "--test", "shift", "list", "--period", "2025-11",
        ])
        .output()
        .expect("run shift list");
    String::from_utf8_lossy(&out.stdout).to_string()
}

#[test]
fn test_exit_within_tolerance_completes_shift() {
    let db_path = setup_test_db("reconcile_completed");
    init_db_with_shift(&db_path);
    run_ok(&db_path, &["clock", "in", "E1", "--at", "2025-11-10 17:03:00"]);

    sk().args([
        "--db", &db_path, "--test", "clock", "out", "E1", "--at", "2025-11-10 22:01:00",
    ])
    .assert()
    .success()
    .stdout(contains("worked 4.97h"))
    .stdout(contains("Shift #1 completed: worked 4.97h of 5.00h planned."));

    let list = shift_list(&db_path);
    assert!(list.contains("completed"), "{list}");
    // the exit record (#2) is linked to the shift
    assert!(list.contains("#2"), "{list}");
}

#[test]
fn test_exit_outside_tolerance_leaves_shift_pending() {
    let db_path = setup_test_db("reconcile_mismatch");
    init_db_with_shift(&db_path);
    run_ok(&db_path, &["clock", "in", "E1", "--at", "2025-11-10 17:00"]);

    sk().args([
        "--db", &db_path, "--test", "clock", "out", "E1", "--at", "2025-11-10 19:00",
    ])
    .assert()
    .success()
    .stdout(contains(
        "Worked 2.00h but shift #1 planned 5.00h (diff 3.00h); left for manual review.",
    ));

    sk().args([
        "--db", &db_path, "--test", "shift", "list", "--period", "2025-11", "--pending",
    ])
    .assert()
    .success()
    .stdout(contains("scheduled"));
}

#[test]
fn test_second_exit_same_day_finds_no_pending_shift() {
    let db_path = setup_test_db("reconcile_second_exit");
    init_db_with_shift(&db_path);
    run_ok(&db_path, &["clock", "in", "E1", "--at", "2025-11-10 17:00"]);
    run_ok(&db_path, &["clock", "out", "E1", "--at", "2025-11-10 22:00"]);
    run_ok(&db_path, &["clock", "in", "E1", "--at", "2025-11-10 22:30"]);

    sk().args([
        "--db", &db_path, "--test", "clock", "out", "E1", "--at", "2025-11-10 23:00",
    ])
    .assert()
    .success()
    .stdout(contains("No pending shift to reconcile."));

    let list = shift_list(&db_path);
    assert!(list.contains("completed"), "{list}");
    // still linked to the first exit, not the second one (#4)
    assert!(list.contains("#2") && !list.contains("#4"), "{list}");

    sk().args(["--db", &db_path, "--test", "db", "--info"])
        .assert()
        .success()
        .stdout(contains("completed: \u{1b}[32m1"))
        .stdout(contains("no shift:  1"));
}

#[test]
fn test_cancelled_shift_is_not_matched() {
    let db_path = setup_test_db("reconcile_cancelled");
    init_db_with_shift(&db_path);
    run_ok(&db_path, &["shift", "cancel", "1"]);
    run_ok(&db_path, &["clock", "in", "E1", "--at", "2025-11-10 17:00"]);

    sk().args([
        "--db", &db_path, "--test", "clock", "out", "E1", "--at", "2025-11-10 22:00",
    ])
    .assert()
    .success()
    .stdout(contains("No pending shift to reconcile."));
}

#[test]
fn test_shift_on_next_day_is_not_matched() {
    let db_path = setup_test_db("reconcile_day_bucket");
    init_db_with_employee(&db_path);
    run_ok(
        &db_path,
        &["shift", "add", "E1", "2025-11-11", "--start", "17:00", "--end", "22:00"],
    );
    run_ok(&db_path, &["clock", "in", "E1", "--at", "2025-11-10 17:00"]);

    sk().args([
        "--db", &db_path, "--test", "clock", "out", "E1", "--at", "2025-11-10 22:00",
    ])
    .assert()
    .success()
    .stdout(contains("No pending shift to reconcile."));
}

#[test]
fn test_reconcile_command_reruns_after_late_planning() {
    let db_path = setup_test_db("reconcile_rerun");
    init_db_with_employee(&db_path);
    run_ok(&db_path, &["clock", "in", "E1", "--at", "2025-11-10 09:00"]);
    run_ok(&db_path, &["clock", "out", "E1", "--at", "2025-11-10 13:00"]);

    // shift planned after the fact
    run_ok(
        &db_path,
        &["shift", "add", "E1", "2025-11-10", "--start", "09:00", "--end", "13:00", "--confirmed"],
    );

    sk().args(["--db", &db_path, "--test", "reconcile", "2"])
        .assert()
        .success()
        .stdout(contains("Shift #1 completed: worked 4.00h of 4.00h planned."));

    sk().args(["--db", &db_path, "--test", "reconcile", "1"])
        .assert()
        .failure()
        .stderr(contains("only exits can be reconciled"));
}

#[test]
fn test_db_info_reports_reconciliation_counters() {
    let db_path = setup_test_db("reconcile_counters");
    init_db_with_shift(&db_path);
    run_ok(&db_path, &["clock", "in", "E1", "--at", "2025-11-10 17:00"]);
    run_ok(&db_path, &["clock", "out", "E1", "--at", "2025-11-10 19:00"]);
    run_ok(&db_path, &["clock", "in", "E1", "--at", "2025-11-10 19:30"]);
    run_ok(&db_path, &["clock", "out", "E1", "--at", "2025-11-10 20:00"]);

    sk().args(["--db", &db_path, "--test", "db", "--info"])
        .assert()
        .success()
        .stdout(contains("mismatch:  \u{1b}[33m2"))
        .stdout(contains("completed: \u{1b}[32m0"));

    sk().args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("reconcile_mismatch").count(2));
}
