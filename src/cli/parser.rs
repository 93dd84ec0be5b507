use crate::errors::AppResult;
use crate::export::range::parse_range;
use crate::export::ExportFormat;
use crate::models::AttendanceFilter;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rattendance
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "School attendance records: bulk marking, percentage reports and CSV/PDF export on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Identity of the caller, recorded as `marked_by` and in the audit log
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Record selection shared by list, report, leaderboard and export.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long = "student", help = "Only this student id")]
    pub student: Option<String>,

    #[arg(long = "classroom", help = "Only this classroom id")]
    pub classroom: Option<String>,

    #[arg(long = "from", value_name = "YYYY-MM-DD", help = "First day included")]
    pub from: Option<String>,

    #[arg(long = "to", value_name = "YYYY-MM-DD", help = "Last day included")]
    pub to: Option<String>,

    #[arg(long = "month", value_name = "YYYY-MM", help = "Only this calendar month")]
    pub month: Option<String>,

    #[arg(
        long = "range",
        value_name = "RANGE",
        conflicts_with_all = ["from", "to"],
        help = "YYYY, YYYY-MM, YYYY-MM-DD or a 'start:end' pair of the same shape"
    )]
    pub range: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> AppResult<AttendanceFilter> {
        let mut filter =
            AttendanceFilter::new().with_text_bounds(self.from.as_deref(), self.to.as_deref())?;

        if let Some(r) = &self.range {
            let (start, end) = parse_range(r)?;
            filter = filter.since(start).until(end);
        }
        if let Some(m) = &self.month {
            filter = filter.month(m)?;
        }
        if let Some(s) = &self.student {
            filter = filter.student(s.trim());
        }
        if let Some(c) = &self.classroom {
            filter = filter.classroom(c.trim());
        }

        Ok(filter)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Inspect or upgrade the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "List settings missing from the configuration file")]
        check: bool,

        #[arg(long = "migrate", help = "Write defaults for missing settings into the file")]
        migrate: bool,
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

    /// Print the audit log
    Log {
        #[arg(long = "print", help = "Print rows from the audit log")]
        print: bool,

        #[arg(long = "limit", default_value_t = 100, help = "Maximum rows to print")]
        limit: usize,
    },

    /// Record one attendance mark
    Mark {
        /// Student id
        student: String,

        /// Classroom id
        classroom: String,

        /// Day of the mark (YYYY-MM-DD)
        date: String,

        #[arg(long = "status", help = "present or absent")]
        status: Option<String>,

        #[arg(long = "absent", conflicts_with = "status", help = "Shortcut for --status absent")]
        absent: bool,

        #[arg(long = "remarks")]
        remarks: Option<String>,

        #[arg(long = "marked-by", help = "Author of the mark (defaults to --user)")]
        marked_by: Option<String>,
    },

    /// Show one record by id
    Get {
        id: String,

        #[arg(long = "json", help = "Print as JSON")]
        json: bool,
    },

    /// Change fields of one record
    Update {
        id: String,

        #[arg(long = "status")]
        status: Option<String>,

        #[arg(long = "date", value_name = "YYYY-MM-DD")]
        date: Option<String>,

        #[arg(long = "remarks")]
        remarks: Option<String>,

        #[arg(long = "marked-by")]
        marked_by: Option<String>,
    },

    /// Delete one record (soft by default)
    Del {
        id: String,

        #[arg(long = "hard", help = "Physically remove the record")]
        hard: bool,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List attendance records
    List {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long = "json", help = "Print as JSON")]
        json: bool,
    },

    /// Mark attendance in bulk from a CSV or JSON file
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Attendance totals and percentages
    Report {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long = "summary", help = "One row per student and classroom")]
        summary: bool,

        #[arg(long = "json", help = "Print as JSON")]
        json: bool,
    },

    /// Rank students by attendance percentage
    Leaderboard {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long = "limit", help = "Show only the first N rows")]
        limit: Option<usize>,
    },

    /// Export attendance data
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "summary", help = "Export per student/classroom totals instead of days")]
        summary: bool,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
