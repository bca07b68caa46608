pub mod clock;
pub mod config;
pub mod db;
pub mod employee;
pub mod export;
pub mod init;
pub mod log;
pub mod reconcile;
pub mod record;
pub mod shift;

use crate::core::reconcile::ReconcileOutcome;
use crate::ui::messages::{info, success, warning};

/// Report a reconciliation outcome to the user.
pub(crate) fn print_outcome(outcome: &ReconcileOutcome) {
    match outcome {
        ReconcileOutcome::Completed { .. } => success(outcome.message()),
        ReconcileOutcome::DurationMismatch { .. } => warning(outcome.message()),
        ReconcileOutcome::NoPendingShift => info(outcome.message()),
        ReconcileOutcome::Unavailable { .. } => warning(outcome.message()),
    }
}
