use serde::Serialize;
use std::fmt;

/// Kind of a clock event: an `entry` opens a work session, an `exit` closes it.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Entry,
    Exit,
}

impl RecordKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            RecordKind::Entry => "entry",
            RecordKind::Exit => "exit",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "entry" => Some(RecordKind::Entry),
            "exit" => Some(RecordKind::Exit),
            _ => None,
        }
    }

    pub fn is_entry(&self) -> bool {
        matches!(self, RecordKind::Entry)
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, RecordKind::Exit)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
