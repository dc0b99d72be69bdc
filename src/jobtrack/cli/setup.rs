use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jobtrack", bin_name = "jobtrack", version)]
#[command(about = "Track job applications from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $JOBTRACK_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add an application
    #[command(alias = "n")]
    Add {
        company: String,
        role: String,

        #[command(flatten)]
        fields: RecordFields,
    },

    /// List applications
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one application in full
    #[command(alias = "v")]
    Show {
        /// Application id or a unique prefix of it
        id: String,
    },

    /// Change fields of an application
    #[command(alias = "e")]
    Edit {
        /// Application id or a unique prefix of it
        id: String,

        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        role: Option<String>,

        #[command(flatten)]
        fields: RecordFields,

        /// Remove the interview date
        #[arg(long, conflicts_with = "interview_date")]
        clear_interview_date: bool,
    },

    /// Delete an application
    #[command(alias = "delete")]
    Rm {
        /// Application id or a unique prefix of it
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show, set or toggle the color theme
    Theme {
        /// light, dark or toggle
        value: Option<String>,
    },

    /// Summarize the job description into the application's notes
    Summarize {
        /// Application id or a unique prefix of it
        id: String,
    },

    /// Generate interview questions and tips for an application
    Prep {
        /// Application id or a unique prefix of it
        id: String,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., model)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

/// Optional record fields shared by `add` and `edit`.
#[derive(Args, Debug, Default)]
pub struct RecordFields {
    /// Applied, Interviewing, Offer or Rejected
    #[arg(short, long)]
    pub status: Option<String>,

    /// Job description ("-" reads it from stdin)
    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Interview date and time, e.g. 2024-05-01T14:30 (kept only while Interviewing)
    #[arg(short = 'i', long)]
    pub interview_date: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only show this status (or "all")
    #[arg(short, long)]
    pub status: Option<String>,

    /// Case-insensitive search over company and role
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// company, role, date or interview-date
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort ascending
    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["jobtrack"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_add_with_fields() {
        let cli = Cli::try_parse_from([
            "jobtrack",
            "add",
            "Acme",
            "Backend Engineer",
            "--status",
            "interviewing",
            "-i",
            "2024-05-01T14:30",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add {
                company,
                role,
                fields,
            }) => {
                assert_eq!(company, "Acme");
                assert_eq!(role, "Backend Engineer");
                assert_eq!(fields.status.as_deref(), Some("interviewing"));
                assert_eq!(fields.interview_date.as_deref(), Some("2024-05-01T14:30"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_list_asc_and_desc_conflict() {
        assert!(Cli::try_parse_from(["jobtrack", "list", "--asc", "--desc"]).is_err());
    }

    #[test]
    fn test_edit_clear_conflicts_with_date() {
        assert!(Cli::try_parse_from([
            "jobtrack",
            "edit",
            "abcd",
            "-i",
            "2024-01-01",
            "--clear-interview-date"
        ])
        .is_err());
    }

    #[test]
    fn test_global_data_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["jobtrack", "ls", "--data", "/tmp/jt"]).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/jt")));
    }
}
