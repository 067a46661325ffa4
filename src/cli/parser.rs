use crate::models::request::RequestKind;
use clap::{Parser, Subcommand};

/// Command-line interface definition for punchclock
#[derive(Parser)]
#[command(
    name = "punchclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "Workforce time tracking: punches, breaks, requests and worked-time reports on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file read or written)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Act as ROLE:ID (employee, company, delegation, center, inspector)
    #[arg(global = true, long = "as", value_name = "ROLE:ID")]
    pub as_user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use with --edit")]
        editor: Option<String>,
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

        #[arg(long = "op", help = "Only rows of this operation (punch, edit, del, ...)")]
        operation: Option<String>,

        #[arg(long = "last", help = "Only the last N rows")]
        last: Option<usize>,
    },

    /// Manage employee profiles
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Self-service punch: in, pause, resume, out
    Punch {
        /// Employee id
        employee: String,

        /// in | pause | resume | out (or clock_in, break_start, ...)
        kind: String,

        #[arg(long = "at", help = "Instant (YYYY-MM-DD HH:MM), default now")]
        at: Option<String>,

        #[arg(long = "type", help = "Time type for a clock-in (turno, formacion, ...)")]
        time_type: Option<String>,

        #[arg(long = "center", help = "Work center for a clock-in")]
        center: Option<String>,
    },

    /// Show where an employee stands (idle, working, on break)
    Status {
        employee: String,

        #[arg(long)]
        json: bool,
    },

    /// Manually manage punches
    Entry {
        #[command(subcommand)]
        action: EntryAction,
    },

    /// Time correction and planner requests
    Request {
        #[command(subcommand)]
        action: RequestAction,
    },

    /// Holiday calendar
    Holiday {
        #[command(subcommand)]
        action: HolidayAction,
    },

    /// Current state and worked time of every visible employee
    Overview {
        #[arg(long, short, help = "Period for the totals (YYYY, YYYY-MM, range)")]
        period: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Worked-time reports
    Report {
        #[command(subcommand)]
        kind: ReportKind,
    },
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    /// Register an employee under the current company
    Add {
        id: String,

        #[arg(long = "name")]
        name: String,

        #[arg(long = "email", default_value = "")]
        email: String,

        #[arg(long = "document", default_value = "")]
        document: String,

        #[arg(long = "delegation")]
        delegation: Option<String>,

        /// Assigned work center (repeatable)
        #[arg(long = "center")]
        centers: Vec<String>,
    },

    /// List visible employees
    List {
        #[arg(long)]
        json: bool,
    },

    /// Deactivate an employee (punches are kept)
    Deactivate { id: String },
}

#[derive(Subcommand)]
pub enum EntryAction {
    /// Insert a punch at any instant
    Add {
        employee: String,

        kind: String,

        #[arg(long = "at", help = "Instant (YYYY-MM-DD HH:MM)")]
        at: String,

        #[arg(long = "type")]
        time_type: Option<String>,

        #[arg(long = "center")]
        center: Option<String>,
    },

    /// Correct a punch
    Edit {
        id: i64,

        #[arg(long = "kind")]
        kind: Option<String>,

        #[arg(long = "at")]
        at: Option<String>,

        #[arg(long = "type")]
        time_type: Option<String>,

        #[arg(long = "center")]
        center: Option<String>,
    },

    /// Soft-delete a punch
    Del { id: i64 },

    /// List punches of an employee
    List {
        employee: String,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long = "all", help = "Include soft-deleted punches")]
        all: bool,
    },
}

#[derive(Subcommand)]
pub enum RequestAction {
    /// Ask for a punch to be added
    Time {
        employee: String,

        kind: String,

        #[arg(long = "at")]
        at: String,

        /// Work center of a requested clock-in
        #[arg(long = "center")]
        center: Option<String>,

        #[arg(long = "comment", default_value = "")]
        comment: String,
    },

    /// Ask for planned absence hours
    Planner {
        employee: String,

        /// compensated | vacation | personal
        #[arg(long = "type")]
        planner_type: String,

        #[arg(long = "from")]
        from: String,

        #[arg(long = "to")]
        to: String,

        #[arg(long = "comment", default_value = "")]
        comment: String,
    },

    /// List requests
    List {
        #[arg(long, value_enum, default_value = "time")]
        kind: RequestKind,

        #[arg(long, help = "pending | approved | rejected")]
        status: Option<String>,
    },

    /// Approve a pending request
    Approve {
        #[arg(value_enum)]
        kind: RequestKind,
        id: i64,
    },

    /// Reject a pending request
    Reject {
        #[arg(value_enum)]
        kind: RequestKind,
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum HolidayAction {
    Add {
        /// YYYY-MM-DD
        date: String,

        name: String,

        /// Restrict to one work center
        #[arg(long = "center")]
        center: Option<String>,
    },

    List {
        #[arg(long, short)]
        period: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ReportKind {
    /// Per-employee totals over a period
    Daily {
        #[arg(long, short)]
        period: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Monthly totals for a year
    Annual {
        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        json: bool,
    },

    /// Per-day register for one employee
    Official {
        employee: String,

        #[arg(long, short)]
        period: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Employees above the hours limit
    Alarms {
        #[arg(long, short)]
        period: Option<String>,

        #[arg(long, help = "Limit in hours (default: hours_limit from config)")]
        limit: Option<f64>,

        #[arg(long)]
        json: bool,
    },
}
