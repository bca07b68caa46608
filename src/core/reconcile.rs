//! Shift reconciliation.
//!
//! After a clock-out, the session that was just closed is compared with the
//! pending shift planned for the same employee and day. When the worked
//! duration is within the tolerance of the planned one, the shift is marked
//! `completed`; otherwise it is left untouched for manual review.
//!
//! Reconciliation is best-effort: it never returns an error to the caller.
//! Persistence failures degrade to [`ReconcileOutcome::Unavailable`].

use crate::errors::AppResult;
use crate::models::shift::Shift;
use crate::models::shift_status::ShiftStatus;
use crate::utils::date::day_bounds;
use crate::utils::formatting::format_hours;
use crate::utils::time::format_timestamp;
use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

/// Default tolerance between worked and planned duration.
pub const DEFAULT_TOLERANCE_MINUTES: u32 = 5;

/// Absorbs binary representation error, e.g. `5.0 - 4.916666…` vs `5/60`.
const HOURS_EPSILON: f64 = 1e-9;

/// Persistence contract required by the reconciler.
pub trait ShiftStore {
    /// A shift of `employee_id` dated inside `[day_start, day_end)` whose
    /// status is pending. With several candidates the earliest one wins.
    fn find_pending_shift(
        &self,
        employee_id: &str,
        day_start: NaiveDateTime,
        day_end: NaiveDateTime,
    ) -> AppResult<Option<Shift>>;

    /// Atomically mark the shift completed, append `note` and link the exit
    /// record, but only if the shift is still pending. Returns `false` when
    /// nothing was updated.
    fn complete_shift(&self, shift_id: i64, note: &str, exit_record_id: Option<i64>)
    -> AppResult<bool>;

    /// Count one reconciliation outcome. Failures here are logged, never
    /// propagated.
    fn record_outcome(&self, _outcome: &str, _target: &str, _message: &str) -> AppResult<()> {
        Ok(())
    }
}

/// A just-closed work session.
#[derive(Debug, Clone)]
pub struct ReconcileRequest {
    pub employee_id: String,
    pub exit_record_id: Option<i64>,
    pub entry_at: NaiveDateTime,
    pub exit_at: NaiveDateTime,
    pub worked_hours: f64,
}

#[derive(Debug, Clone)]
pub enum ReconcileOutcome {
    Completed {
        shift: Shift,
        worked_hours: f64,
        planned_hours: f64,
        message: String,
    },
    DurationMismatch {
        shift: Shift,
        worked_hours: f64,
        planned_hours: f64,
        diff: f64,
        message: String,
    },
    NoPendingShift,
    Unavailable {
        reason: String,
    },
}

impl ReconcileOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ReconcileOutcome::Completed { .. })
    }

    /// Suffix of the `reconcile_*` operation written to the internal log.
    pub fn label(&self) -> &'static str {
        match self {
            ReconcileOutcome::Completed { .. } => "completed",
            ReconcileOutcome::DurationMismatch { .. } => "mismatch",
            ReconcileOutcome::NoPendingShift => "none",
            ReconcileOutcome::Unavailable { .. } => "failed",
        }
    }

    pub fn message(&self) -> String {
        match self {
            ReconcileOutcome::Completed { message, .. }
            | ReconcileOutcome::DurationMismatch { message, .. } => message.clone(),
            ReconcileOutcome::NoPendingShift => "No pending shift to reconcile.".to_string(),
            ReconcileOutcome::Unavailable { reason } => {
                format!("Shift reconciliation unavailable: {reason}")
            }
        }
    }
}

pub struct Reconciler<'a, S: ShiftStore> {
    store: &'a S,
    tolerance_hours: f64,
}

impl<'a, S: ShiftStore> Reconciler<'a, S> {
    pub fn new(store: &'a S, tolerance_minutes: u32) -> Self {
        Self {
            store,
            tolerance_hours: tolerance_minutes as f64 / 60.0,
        }
    }

    pub fn tolerance_hours(&self) -> f64 {
        self.tolerance_hours
    }

    pub fn reconcile(&self, req: &ReconcileRequest) -> ReconcileOutcome {
        let outcome = match self.try_reconcile(req) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(
                    employee = %req.employee_id,
                    exit_record = ?req.exit_record_id,
                    error = %e,
                    "shift reconciliation failed"
                );
                ReconcileOutcome::Unavailable {
                    reason: e.to_string(),
                }
            }
        };

        let target = match &outcome {
            ReconcileOutcome::Completed { shift, .. }
            | ReconcileOutcome::DurationMismatch { shift, .. } => format!("shift #{}", shift.id),
            _ => req.employee_id.clone(),
        };

        if let Err(e) = self
            .store
            .record_outcome(outcome.label(), &target, &outcome.message())
        {
            warn!(error = %e, "could not record reconciliation outcome");
        }

        outcome
    }

    fn try_reconcile(&self, req: &ReconcileRequest) -> AppResult<ReconcileOutcome> {
        let (day_start, day_end) = day_bounds(req.entry_at);

        let Some(mut shift) =
            self.store
                .find_pending_shift(&req.employee_id, day_start, day_end)?
        else {
            debug!(employee = %req.employee_id, day = %day_start.date(), "no pending shift");
            return Ok(ReconcileOutcome::NoPendingShift);
        };

        let planned = shift.planned_hours;
        let diff = (req.worked_hours - planned).abs();

        if diff > self.tolerance_hours + HOURS_EPSILON {
            info!(shift = shift.id, worked = req.worked_hours, planned, diff, "duration mismatch");
            let message = format!(
                "Worked {} but shift #{} planned {} (diff {}); left for manual review.",
                format_hours(req.worked_hours),
                shift.id,
                format_hours(planned),
                format_hours(diff)
            );
            return Ok(ReconcileOutcome::DurationMismatch {
                shift,
                worked_hours: req.worked_hours,
                planned_hours: planned,
                diff,
                message,
            });
        }

        let note = format!(
            "[auto] completed by clock-out at {}: worked {} (planned {})",
            format_timestamp(&req.exit_at),
            format_hours(req.worked_hours),
            format_hours(planned)
        );

        if !self
            .store
            .complete_shift(shift.id, &note, req.exit_record_id)?
        {
            // Completed or cancelled by someone else between lookup and update.
            debug!(shift = shift.id, "shift no longer pending");
            return Ok(ReconcileOutcome::NoPendingShift);
        }

        shift.status = ShiftStatus::Completed;
        shift.append_note(&note);
        shift.time_record_id = req.exit_record_id;

        info!(shift = shift.id, worked = req.worked_hours, planned, "shift completed");

        let message = format!(
            "Shift #{} completed: worked {} of {} planned.",
            shift.id,
            format_hours(req.worked_hours),
            format_hours(planned)
        );

        Ok(ReconcileOutcome::Completed {
            shift,
            worked_hours: req.worked_hours,
            planned_hours: planned,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use chrono::{NaiveDate, NaiveTime};
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct MemoryShiftStore {
        shifts: RefCell<Vec<Shift>>,
        fail: Cell<bool>,
        writes: Cell<usize>,
        outcomes: RefCell<Vec<String>>,
    }

    impl MemoryShiftStore {
        fn with(shifts: Vec<Shift>) -> Self {
            Self {
                shifts: RefCell::new(shifts),
                ..Default::default()
            }
        }

        fn get(&self, id: i64) -> Shift {
            self.shifts
                .borrow()
                .iter()
                .find(|s| s.id == id)
                .cloned()
                .unwrap()
        }
    }

    impl ShiftStore for MemoryShiftStore {
        fn find_pending_shift(
            &self,
            employee_id: &str,
            day_start: NaiveDateTime,
            day_end: NaiveDateTime,
        ) -> AppResult<Option<Shift>> {
            if self.fail.get() {
                return Err(AppError::Db(rusqlite::Error::InvalidQuery));
            }
            let midnight = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
            let mut hits: Vec<Shift> = self
                .shifts
                .borrow()
                .iter()
                .filter(|s| s.employee_id == employee_id && s.status.is_pending())
                .filter(|s| {
                    let at = s.date.and_time(midnight);
                    at >= day_start && at < day_end
                })
                .cloned()
                .collect();
            hits.sort_by_key(|s| (s.start, s.id));
            Ok(hits.into_iter().next())
        }

        fn complete_shift(
            &self,
            shift_id: i64,
            note: &str,
            exit_record_id: Option<i64>,
        ) -> AppResult<bool> {
            let mut shifts = self.shifts.borrow_mut();
            let Some(s) = shifts
                .iter_mut()
                .find(|s| s.id == shift_id && s.status.is_pending())
            else {
                return Ok(false);
            };
            s.status = ShiftStatus::Completed;
            s.append_note(note);
            s.time_record_id = exit_record_id;
            self.writes.set(self.writes.get() + 1);
            Ok(true)
        }

        fn record_outcome(&self, outcome: &str, _target: &str, _message: &str) -> AppResult<()> {
            self.outcomes.borrow_mut().push(outcome.to_string());
            Ok(())
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn evening_shift(id: i64, status: ShiftStatus) -> Shift {
        let mut s = Shift::new(
            "E1",
            date("2025-11-10"),
            time("17:00"),
            time("22:00"),
            status,
            "",
        )
        .unwrap();
        s.id = id;
        s
    }

    fn request(entry: &str, exit: &str, worked: f64) -> ReconcileRequest {
        ReconcileRequest {
            employee_id: "E1".into(),
            exit_record_id: Some(42),
            entry_at: ts(entry),
            exit_at: ts(exit),
            worked_hours: worked,
        }
    }

    #[test]
    fn completes_shift_within_tolerance() {
        let store = MemoryShiftStore::with(vec![evening_shift(1, ShiftStatus::Scheduled)]);
        let rec = Reconciler::new(&store, DEFAULT_TOLERANCE_MINUTES);

        let out = rec.reconcile(&request("2025-11-10 17:03:00", "2025-11-10 22:01:00", 4.97));

        match out {
            ReconcileOutcome::Completed {
                shift,
                worked_hours,
                planned_hours,
                ..
            } => {
                assert_eq!(shift.status, ShiftStatus::Completed);
                assert_eq!(worked_hours, 4.97);
                assert_eq!(planned_hours, 5.0);
            }
            other => panic!("expected completion, got {other:?}"),
        }

        let stored = store.get(1);
        assert_eq!(stored.status, ShiftStatus::Completed);
        assert_eq!(stored.time_record_id, Some(42));
        assert!(stored.notes.contains("worked 4.97h"));
    }

    #[test]
    fn reports_mismatch_without_writing() {
        let store = MemoryShiftStore::with(vec![evening_shift(1, ShiftStatus::Confirmed)]);
        let rec = Reconciler::new(&store, DEFAULT_TOLERANCE_MINUTES);

        let out = rec.reconcile(&request("2025-11-10 17:00:00", "2025-11-10 19:00:00", 2.0));

        match out {
            ReconcileOutcome::DurationMismatch { diff, .. } => {
                assert!((diff - 3.0).abs() < 1e-9);
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
        assert_eq!(store.writes.get(), 0);
        assert_eq!(store.get(1).status, ShiftStatus::Confirmed);
        assert!(store.get(1).notes.is_empty());
    }

    #[test]
    fn tolerance_boundary_is_inclusive() {
        let store = MemoryShiftStore::with(vec![evening_shift(1, ShiftStatus::Scheduled)]);
        let rec = Reconciler::new(&store, 5);

        let exactly_five_minutes = 5.0 - 5.0 / 60.0;
        let out = rec.reconcile(&request(
            "2025-11-10 17:00:00",
            "2025-11-10 21:55:00",
            exactly_five_minutes,
        ));
        assert!(out.is_completed());
    }

    #[test]
    fn diff_just_past_tolerance_is_a_mismatch() {
        let store = MemoryShiftStore::with(vec![evening_shift(1, ShiftStatus::Scheduled)]);
        let rec = Reconciler::new(&store, 5);

        // 4h54m36s is exactly 4.91h: diff 0.09h against a 0.0833h tolerance
        let out = rec.reconcile(&request(
            "2025-11-10 17:00:00",
            "2025-11-10 21:54:36",
            4.91,
        ));
        assert_eq!(out.label(), "mismatch");
        assert_eq!(store.writes.get(), 0);
    }

    #[test]
    fn tolerance_is_injected() {
        let store = MemoryShiftStore::with(vec![evening_shift(1, ShiftStatus::Scheduled)]);
        let rec = Reconciler::new(&store, 15);
        assert!((rec.tolerance_hours() - 0.25).abs() < 1e-12);

        let out = rec.reconcile(&request("2025-11-10 17:00:00", "2025-11-10 21:50:00", 4.83));
        assert!(out.is_completed());
    }

    #[test]
    fn second_exit_same_day_finds_nothing() {
        let store = MemoryShiftStore::with(vec![evening_shift(1, ShiftStatus::Scheduled)]);
        let rec = Reconciler::new(&store, DEFAULT_TOLERANCE_MINUTES);

        assert!(
            rec.reconcile(&request("2025-11-10 17:00:00", "2025-11-10 22:00:00", 5.0))
                .is_completed()
        );
        let notes_after_first = store.get(1).notes.clone();

        let again = rec.reconcile(&request("2025-11-10 22:30:00", "2025-11-10 23:00:00", 0.5));
        assert!(matches!(again, ReconcileOutcome::NoPendingShift));
        assert_eq!(store.get(1).notes, notes_after_first);
        assert_eq!(store.writes.get(), 1);
    }

    #[test]
    fn terminal_statuses_are_never_matched() {
        for status in [ShiftStatus::Completed, ShiftStatus::Cancelled] {
            let store = MemoryShiftStore::with(vec![evening_shift(1, status)]);
            let rec = Reconciler::new(&store, DEFAULT_TOLERANCE_MINUTES);

            let out = rec.reconcile(&request("2025-11-10 17:00:00", "2025-11-10 22:00:00", 5.0));
            assert!(matches!(out, ReconcileOutcome::NoPendingShift));
            assert_eq!(store.writes.get(), 0);
        }
    }

    #[test]
    fn buckets_by_the_entry_day() {
        let store = MemoryShiftStore::with(vec![evening_shift(1, ShiftStatus::Scheduled)]);
        let rec = Reconciler::new(&store, DEFAULT_TOLERANCE_MINUTES);

        let day_before = rec.reconcile(&request("2025-11-09 23:59:59", "2025-11-10 04:59:59", 5.0));
        assert!(matches!(day_before, ReconcileOutcome::NoPendingShift));

        let day_after = rec.reconcile(&request("2025-11-11 00:00:00", "2025-11-11 05:00:00", 5.0));
        assert!(matches!(day_after, ReconcileOutcome::NoPendingShift));

        let first_second = rec.reconcile(&request("2025-11-10 00:00:00", "2025-11-10 05:00:00", 5.0));
        assert!(first_second.is_completed());
    }

    #[test]
    fn earliest_pending_shift_wins() {
        let mut late = evening_shift(7, ShiftStatus::Scheduled);
        late.reschedule(time("18:00"), time("23:00")).unwrap();
        let early = evening_shift(9, ShiftStatus::Scheduled);
        let store = MemoryShiftStore::with(vec![late, early]);
        let rec = Reconciler::new(&store, DEFAULT_TOLERANCE_MINUTES);

        let out = rec.reconcile(&request("2025-11-10 17:00:00", "2025-11-10 22:00:00", 5.0));
        match out {
            ReconcileOutcome::Completed { shift, .. } => assert_eq!(shift.id, 9),
            other => panic!("expected completion, got {other:?}"),
        }
        assert_eq!(store.get(7).status, ShiftStatus::Scheduled);
    }

    #[test]
    fn store_failure_degrades_to_unavailable() {
        let store = MemoryShiftStore::with(vec![evening_shift(1, ShiftStatus::Scheduled)]);
        store.fail.set(true);
        let rec = Reconciler::new(&store, DEFAULT_TOLERANCE_MINUTES);

        let out = rec.reconcile(&request("2025-11-10 17:00:00", "2025-11-10 22:00:00", 5.0));
        assert!(matches!(out, ReconcileOutcome::Unavailable { .. }));
        assert_eq!(store.get(1).status, ShiftStatus::Scheduled);
        assert_eq!(store.outcomes.borrow().as_slice(), ["failed"]);
    }

    #[test]
    fn every_outcome_is_counted() {
        let store = MemoryShiftStore::with(vec![evening_shift(1, ShiftStatus::Scheduled)]);
        let rec = Reconciler::new(&store, DEFAULT_TOLERANCE_MINUTES);

        rec.reconcile(&request("2025-11-10 17:00:00", "2025-11-10 19:00:00", 2.0));
        rec.reconcile(&request("2025-11-10 17:00:00", "2025-11-10 22:00:00", 5.0));
        rec.reconcile(&request("2025-11-10 22:10:00", "2025-11-10 22:40:00", 0.5));

        assert_eq!(
            store.outcomes.borrow().as_slice(),
            ["mismatch", "completed", "none"]
        );
    }
}
