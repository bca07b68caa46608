use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for shiftkeeper
/// Employee clock-in/out with automatic shift reconciliation on SQLite
#[derive(Parser)]
#[command(
    name = "shiftkeeper",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track employee clock-in/out and reconcile worked time against planned shifts",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show or check the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Register, list or deactivate employees
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Record a clock-in or clock-out
    Clock {
        #[command(subcommand)]
        action: ClockAction,
    },

    /// Inspect and correct time records
    Record {
        #[command(subcommand)]
        action: RecordAction,
    },

    /// Plan and manage shifts
    Shift {
        #[command(subcommand)]
        action: ShiftAction,
    },

    /// Re-run shift reconciliation for a stored exit record
    Reconcile {
        /// Id of the exit time record
        record_id: i64,
    },

    /// Export time records or shifts
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute path of the output file")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 's', help = "Export shifts instead of time records")]
        shifts: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    /// Register a new employee
    Add {
        /// Stable employee identifier (badge, payroll code, ...)
        id: String,

        #[arg(long)]
        name: String,
    },

    /// List employees
    List,

    /// Mark an employee inactive
    Deactivate { id: String },
}

#[derive(Subcommand)]
pub enum ClockAction {
    /// Record an entry
    In(ClockArgs),

    /// Record an exit and reconcile it against the planned shift
    Out(ClockArgs),
}

#[derive(clap::Args)]
pub struct ClockArgs {
    pub employee: String,

    #[arg(long, help = "Event time (YYYY-MM-DD HH:MM[:SS]); defaults to now")]
    pub at: Option<String>,

    #[arg(long)]
    pub note: Option<String>,

    #[arg(long)]
    pub location: Option<String>,
}

#[derive(Subcommand)]
pub enum RecordAction {
    /// List time records
    List {
        #[arg(long, short)]
        employee: Option<String>,

        #[arg(long, short, help = "YYYY, YYYY-MM, YYYY-MM-DD, a range A:B, or 'all'")]
        period: Option<String>,
    },

    /// Correct a time record
    Edit {
        id: i64,

        #[arg(long)]
        at: Option<String>,

        #[arg(long, help = "New note; an empty string clears it")]
        note: Option<String>,

        #[arg(long, help = "New location; an empty string clears it")]
        location: Option<String>,
    },

    /// Delete a time record
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum ShiftAction {
    /// Plan a shift
    Add {
        employee: String,

        /// Calendar date (YYYY-MM-DD)
        date: String,

        #[arg(long, help = "Start time (HH:MM)")]
        start: String,

        #[arg(long, help = "End time (HH:MM)")]
        end: String,

        #[arg(long, help = "Create the shift as confirmed instead of scheduled")]
        confirmed: bool,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Edit a shift
    Edit {
        id: i64,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,

        #[arg(long, help = "scheduled, confirmed, completed or cancelled")]
        status: Option<String>,

        #[arg(long, help = "Replace the shift notes")]
        notes: Option<String>,
    },

    /// Cancel a shift
    Cancel { id: i64 },

    /// Delete a shift
    Del { id: i64 },

    /// List shifts
    List {
        #[arg(long, short)]
        employee: Option<String>,

        #[arg(long, short, help = "YYYY, YYYY-MM, YYYY-MM-DD, a range A:B, or 'all'")]
        period: Option<String>,

        #[arg(long, help = "Only scheduled or confirmed shifts")]
        pending: bool,
    },
}
