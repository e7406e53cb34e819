//! Command-line definitions for the `harbor` binary.

use clap::{Parser, Subcommand, ValueEnum};

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub limit: Option<u32>,
    pub db: Option<String>,
    pub quiet: bool,
    pub verbose: bool,
}

/// Top-level CLI parser for the `harbor` binary.
#[derive(Debug, Parser)]
#[command(name = "harbor", version, about = "Harbor - repository catalog")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Database path (overrides configuration)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            db: self.db.clone(),
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Repository catalog operations
    Repo {
        #[command(subcommand)]
        action: RepoAction,
    },
    /// Commit operations
    Commit {
        #[command(subcommand)]
        action: CommitAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum RepoAction {
    /// Create a repository
    Create {
        name: String,
        /// Version-control system: git, mercurial, svn
        #[arg(long, default_value = "git")]
        vcs: String,
        /// Unique short alias, e.g. KRNL
        #[arg(long)]
        callsign: Option<String>,
    },
    /// List repositories, newest first
    List {
        /// Tracked-status selector: open, closed, all
        #[arg(long)]
        status: Option<String>,
        /// Restrict to these numeric ids (repeatable)
        #[arg(long = "id")]
        ids: Vec<i64>,
        /// Restrict to these external keys (repeatable)
        #[arg(long = "uid")]
        uids: Vec<String>,
        /// Restrict to these callsigns (repeatable)
        #[arg(long = "callsign")]
        callsigns: Vec<String>,
        /// Attach commit counts
        #[arg(long)]
        counts: bool,
        /// Attach each repository's most recent commit
        #[arg(long)]
        last_commit: bool,
        /// Resume below this cursor
        #[arg(long)]
        after: Option<i64>,
    },
    /// Mark a repository as tracked
    Track { id: i64 },
    /// Mark a repository as untracked
    Untrack { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum CommitAction {
    /// Record a commit against a repository
    Record {
        repository_id: i64,
        hash: String,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long)]
        author: Option<String>,
    },
    /// List a repository's commits, newest first
    Log {
        repository_id: i64,
        /// Resume below this cursor
        #[arg(long)]
        after: Option<i64>,
    },
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat, RepoAction};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "harbor", "--format", "table", "--limit", "10", "repo", "list",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(matches!(cli.command, Commands::Repo { .. }));
    }

    #[test]
    fn repo_list_accepts_repeated_filters() {
        let cli = Cli::try_parse_from([
            "harbor", "repo", "list", "--id", "5", "--id", "9", "--status", "open", "--counts",
        ])
        .expect("cli should parse");

        let Commands::Repo {
            action:
                RepoAction::List {
                    ids,
                    status,
                    counts,
                    last_commit,
                    ..
                },
        } = cli.command
        else {
            panic!("expected repo list");
        };
        assert_eq!(ids, vec![5, 9]);
        assert_eq!(status.as_deref(), Some("open"));
        assert!(counts);
        assert!(!last_commit);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["harbor", "--format", "xml", "repo", "list"]);
        assert!(parsed.is_err());
    }
}
