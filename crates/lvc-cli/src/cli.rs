use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lvc", about = "lvc: minimal linear version control", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working root containing the repository directory
    #[arg(short = 'C', long = "repo", global = true, default_value = ".")]
    pub repo: PathBuf,

    /// TOML file overriding repository layout names
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize a new repository
    Init,
    /// Stage files for the next commit
    Add(AddArgs),
    /// Show staged files
    Status,
    /// Record the staged files as a new commit
    Commit(CommitArgs),
    /// Show commit history
    Log(LogArgs),
    /// Show changes a commit made relative to its parent
    Diff(DiffArgs),
    /// Verify commit chain integrity
    Verify,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Args)]
pub struct CommitArgs {
    #[arg(short, long)]
    pub message: String,
}

#[derive(Args)]
pub struct LogArgs {
    #[arg(long)]
    pub oneline: bool,
}

#[derive(Args)]
pub struct DiffArgs {
    /// Commit to diff; defaults to HEAD
    pub commit: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init() {
        let cli = Cli::try_parse_from(["lvc", "init"]).unwrap();
        assert!(matches!(cli.command, Command::Init));
        assert_eq!(cli.repo, PathBuf::from("."));
    }

    #[test]
    fn parse_add_many() {
        let cli = Cli::try_parse_from(["lvc", "add", "a.txt", "b.txt"]).unwrap();
        if let Command::Add(args) = cli.command {
            assert_eq!(args.files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn add_requires_a_file() {
        assert!(Cli::try_parse_from(["lvc", "add"]).is_err());
    }

    #[test]
    fn parse_commit() {
        let cli = Cli::try_parse_from(["lvc", "commit", "-m", "hello"]).unwrap();
        if let Command::Commit(args) = cli.command {
            assert_eq!(args.message, "hello");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn commit_requires_message() {
        assert!(Cli::try_parse_from(["lvc", "commit"]).is_err());
    }

    #[test]
    fn parse_log_oneline() {
        let cli = Cli::try_parse_from(["lvc", "log", "--oneline"]).unwrap();
        if let Command::Log(args) = cli.command {
            assert!(args.oneline);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_diff_optional_hash() {
        let cli = Cli::try_parse_from(["lvc", "diff"]).unwrap();
        assert!(matches!(cli.command, Command::Diff(DiffArgs { commit: None })));

        let cli = Cli::try_parse_from(["lvc", "diff", "abc"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.commit.as_deref(), Some("abc"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_globals() {
        let cli = Cli::try_parse_from([
            "lvc", "--verbose", "--format", "json", "-C", "/work", "--config", "lvc.toml", "log",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.repo, PathBuf::from("/work"));
        assert_eq!(cli.config, Some(PathBuf::from("lvc.toml")));
    }
}
