use crate::errors::AppError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a planned shift.
///
/// `Scheduled` and `Confirmed` are *pending*: the shift has not been worked
/// yet and can still be matched by a clock-out. `Completed` and `Cancelled`
/// are terminal for reconciliation purposes.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShiftStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
}

impl ShiftStatus {
    pub const PENDING: [ShiftStatus; 2] = [ShiftStatus::Scheduled, ShiftStatus::Confirmed];

    pub fn to_db_str(&self) -> &'static str {
        match self {
            ShiftStatus::Scheduled => "scheduled",
            ShiftStatus::Confirmed => "confirmed",
            ShiftStatus::Completed => "completed",
            ShiftStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(ShiftStatus::Scheduled),
            "confirmed" => Some(ShiftStatus::Confirmed),
            "completed" => Some(ShiftStatus::Completed),
            "cancelled" => Some(ShiftStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        Self::PENDING.contains(self)
    }
}

impl FromStr for ShiftStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_db_str(&s.trim().to_lowercase()).ok_or_else(|| AppError::InvalidStatus(s.into()))
    }
}

impl fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
