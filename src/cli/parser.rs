use crate::config::StorageKind;
use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command-line interface definition for cadetroster
/// Cadet roster and daily attendance tracker
#[derive(Parser)]
#[command(
    name = "cadetroster",
    version = env!("CARGO_PKG_VERSION"),
    about = "Cadet roster and attendance tracker: maintain the roster, mark daily attendance and export monthly reports",
    long_about = None
)]
pub struct Cli {
    /// Override the store path (useful for tests or a custom store)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Storage backend to use (overrides the configuration)
    #[arg(global = true, long = "storage", value_enum)]
    pub storage: Option<StorageKind>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Optional roster fields shared by `add` and `edit`.
#[derive(Args, Debug, Clone, Default)]
pub struct OptionalFields {
    #[arg(long = "roll", help = "University roll number")]
    pub roll: Option<String>,

    #[arg(long = "department", help = "Department")]
    pub department: Option<String>,

    #[arg(long = "dob", help = "Date of birth (YYYY-MM-DD)")]
    pub dob: Option<String>,

    #[arg(long = "father", help = "Father's name")]
    pub father: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the store and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Add a cadet to the roster
    Add {
        #[arg(long = "name", help = "Full name")]
        name: String,

        #[arg(long = "gender", help = "Male or Female (M/F)")]
        gender: String,

        #[arg(long = "regimental", help = "Regimental number")]
        regimental: String,

        #[arg(long = "phone")]
        phone: String,

        #[arg(long = "email")]
        email: String,

        #[command(flatten)]
        optional: OptionalFields,
    },

    /// Update fields of an existing cadet
    Edit {
        /// Cadet display ID (e.g. SD/001) or store id
        cadet: String,

        #[arg(long = "name")]
        name: Option<String>,

        #[arg(long = "gender")]
        gender: Option<String>,

        #[arg(long = "regimental")]
        regimental: Option<String>,

        #[arg(long = "phone")]
        phone: Option<String>,

        #[arg(long = "email")]
        email: Option<String>,

        #[command(flatten)]
        optional: OptionalFields,
    },

    /// Delete one or more cadets
    Del {
        /// Cadet display IDs or store ids
        #[arg(required = true)]
        cadets: Vec<String>,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List the roster
    List {
        #[arg(long, short, help = "Filter by name or display ID")]
        search: Option<String>,
    },

    /// Mark attendance for a day
    Mark {
        /// Date (YYYY-MM-DD)
        date: String,

        #[arg(long = "all", help = "Status for every cadet: P, A, R, M or C")]
        all: Option<String>,

        #[arg(
            long = "set",
            value_name = "CADET=STATUS",
            help = "Status for one cadet, applied after --all (repeatable)"
        )]
        set: Vec<String>,

        #[arg(long = "legacy", help = "Save as a plain present-list")]
        legacy: bool,
    },

    /// Show the attendance recorded for a day
    Show {
        /// Date (YYYY-MM-DD)
        date: String,

        #[arg(long, short, help = "Filter by name or display ID")]
        search: Option<String>,
    },

    /// Delete the attendance record of a day
    Unmark {
        /// Date (YYYY-MM-DD)
        date: String,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Monthly attendance matrix
    Report {
        #[arg(long = "from", help = "First day (default: first of current month)")]
        from: Option<String>,

        #[arg(long = "to", help = "Last day (default: today)")]
        to: Option<String>,
    },

    /// Export roster or attendance to a file
    Export {
        #[arg(value_enum)]
        what: ExportWhat,

        #[arg(long = "date", help = "Day to export (attendance; default today)")]
        date: Option<String>,

        #[arg(long = "from", help = "First day (monthly)")]
        from: Option<String>,

        #[arg(long = "to", help = "Last day (monthly)")]
        to: Option<String>,

        #[arg(
            long = "select",
            num_args = 1..,
            help = "Only these cadets (roster)"
        )]
        select: Vec<String>,

        #[arg(long = "format", value_enum, help = "Output format (default from config)")]
        format: Option<ExportFormat>,

        #[arg(long = "dir", help = "Output directory")]
        dir: Option<String>,

        #[arg(long = "force", help = "Overwrite an existing file")]
        force: bool,
    },

    /// Remove cadets sharing a regimental number (first one kept)
    Dedupe {
        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Print the internal operation log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log")]
        print: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportWhat {
    Roster,
    Attendance,
    Monthly,
}
