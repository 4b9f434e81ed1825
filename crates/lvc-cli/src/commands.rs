use anyhow::{bail, Context};
use colored::Colorize;
use lvc_sdk::{
    AddOutcome, CommitOutcome, DiffOutcome, InitOutcome, LogEntry, Manifest, RepoConfig,
    Repository, VerifyReport,
};
use serde::Serialize;
use tracing::debug;

use crate::cli::*;

const LOG_SEPARATOR_WIDTH: usize = 48;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => RepoConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RepoConfig::default(),
    };
    debug!(repo = %cli.repo.display(), ?config, "resolved repository config");
    let format = cli.format;
    let open = || Repository::open(&cli.repo, &config);

    match cli.command {
        Command::Init => cmd_init(Repository::init(&cli.repo, &config)?, format),
        Command::Add(args) => cmd_add(&open()?, args, format),
        Command::Status => cmd_status(&open()?, format),
        Command::Commit(args) => cmd_commit(&open()?, args, format),
        Command::Log(args) => cmd_log(&open()?, args, format),
        Command::Diff(args) => cmd_diff(&open()?, args, format),
        Command::Verify => cmd_verify(&open()?, format),
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_init(outcome: InitOutcome, format: OutputFormat) -> anyhow::Result<()> {
    let dir = outcome.repository().work_dir().display().to_string();
    let created = matches!(outcome, InitOutcome::Created(_));

    if format == OutputFormat::Json {
        let result = if created { "created" } else { "already_initialized" };
        return print_json(&serde_json::json!({ "result": result, "work_dir": dir }));
    }
    if created {
        println!("{} Initialized empty lvc repository in {}", "✓".green().bold(), dir.bold());
    } else {
        println!("Repository already exists");
    }
    Ok(())
}

fn cmd_add(repo: &Repository, args: AddArgs, format: OutputFormat) -> anyhow::Result<()> {
    let mut outcomes = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let outcome = repo.add(path)?;
        if format == OutputFormat::Text {
            println!("{}", render_add(&outcome));
        }
        outcomes.push(outcome);
    }

    if format == OutputFormat::Json {
        return print_json(&outcomes);
    }
    Ok(())
}

fn render_add(outcome: &AddOutcome) -> String {
    match outcome {
        AddOutcome::Added { path, .. } => format!("  {} {}", "staged:".green(), path),
        AddOutcome::AlreadyStaged { path, .. } => {
            format!("  {} {} (same content)", "unchanged:".dimmed(), path)
        }
    }
}

fn cmd_status(repo: &Repository, format: OutputFormat) -> anyhow::Result<()> {
    let staged = repo.status()?;
    match format {
        OutputFormat::Json => print_json(&staged),
        OutputFormat::Text => {
            println!("{}", render_status(&staged));
            Ok(())
        }
    }
}

fn render_status(staged: &Manifest) -> String {
    if staged.is_empty() {
        return "No changes staged.".to_string();
    }
    let mut out = String::from("Changes to be committed:");
    for entry in staged {
        out.push_str(&format!("\n  {}  {}", entry.id.short_hex().dimmed(), entry.path.green()));
    }
    out
}

fn cmd_commit(repo: &Repository, args: CommitArgs, format: OutputFormat) -> anyhow::Result<()> {
    let outcome = repo.commit(&args.message)?;

    if format == OutputFormat::Json {
        let value = match &outcome {
            CommitOutcome::Committed { id, record } => serde_json::json!({
                "result": "committed",
                "id": id,
                "record": record,
            }),
            CommitOutcome::NothingToCommit => serde_json::json!({ "result": "nothing_to_commit" }),
        };
        return print_json(&value);
    }

    match outcome {
        CommitOutcome::Committed { id, record } => {
            println!("{} Committed {}", "✓".green().bold(), id.to_string().yellow());
            println!("  Message: {}", record.message);
            println!("  Files: {}", record.files.len());
        }
        CommitOutcome::NothingToCommit => println!("Nothing to commit"),
    }
    Ok(())
}

fn cmd_log(repo: &Repository, args: LogArgs, format: OutputFormat) -> anyhow::Result<()> {
    let entries = repo.log()?;
    match format {
        OutputFormat::Json => print_json(&entries),
        OutputFormat::Text => {
            println!("{}", render_log(&entries, args.oneline));
            Ok(())
        }
    }
}

fn render_log(entries: &[LogEntry], oneline: bool) -> String {
    if entries.is_empty() {
        return "No commits yet.".to_string();
    }

    let separator = "-".repeat(LOG_SEPARATOR_WIDTH);
    let lines: Vec<String> = entries
        .iter()
        .map(|entry| {
            if oneline {
                format!("{} {}", entry.id.short_hex().yellow(), entry.message)
            } else {
                format!(
                    "{} {}\n{} {}\n{} {}\n{separator}",
                    "Commit:".bold(),
                    entry.id.to_string().yellow(),
                    "Date:".bold(),
                    entry.timestamp,
                    "Message:".bold(),
                    entry.message
                )
            }
        })
        .collect();
    lines.join("\n")
}

fn cmd_diff(repo: &Repository, args: DiffArgs, format: OutputFormat) -> anyhow::Result<()> {
    let outcome = match &args.commit {
        Some(hash) => repo.diff(hash)?,
        None => repo.diff_head()?,
    };
    match format {
        OutputFormat::Json => print_json(&outcome),
        OutputFormat::Text => {
            println!("{}", render_diff(&outcome));
            Ok(())
        }
    }
}

fn render_diff(outcome: &DiffOutcome) -> String {
    match outcome {
        DiffOutcome::FirstCommit { .. } => {
            "This is the first commit. No parent commit found.".to_string()
        }
        DiffOutcome::NoChanges { .. } => "No changes detected.".to_string(),
        DiffOutcome::Changes(diff) => diff
            .to_string()
            .lines()
            .map(colorize_diff_line)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn colorize_diff_line(line: &str) -> String {
    if line.starts_with("diff --lvc") || line.starts_with("+++") || line.starts_with("---") {
        line.bold().to_string()
    } else if line.starts_with("@@") {
        line.cyan().to_string()
    } else if line.starts_with('+') {
        line.green().to_string()
    } else if line.starts_with('-') {
        line.red().to_string()
    } else {
        line.to_string()
    }
}

fn cmd_verify(repo: &Repository, format: OutputFormat) -> anyhow::Result<()> {
    let report = repo.verify()?;
    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => println!("{}", render_verify(&report)),
    }
    if !report.is_valid() {
        bail!("commit chain verification failed");
    }
    Ok(())
}

fn render_verify(report: &VerifyReport) -> String {
    if report.is_valid() {
        return format!(
            "{} Commit chain verified ({} commits)",
            "✓".green().bold(),
            report.commits
        );
    }

    let mut out = format!(
        "{} {} problem(s) in {} readable commits",
        "✗".red().bold(),
        report.violations.len(),
        report.commits
    );
    for violation in &report.violations {
        out.push_str(&format!(
            "\n  {:?} {}: {}",
            violation.kind,
            violation.commit.short_hex().yellow(),
            violation.description
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lvc_sdk::{CommitTimestamp, ObjectId};

    fn plain() {
        colored::control::set_override(false);
    }

    fn entry(n: u8, message: &str, parent: Option<ObjectId>) -> LogEntry {
        LogEntry {
            id: ObjectId::from_hash([n; 20]),
            parent,
            timestamp: CommitTimestamp::from_raw("Mon Jan 02 15:04:05 2006"),
            message: message.into(),
        }
    }

    #[test]
    fn log_full_layout() {
        plain();
        let id = ObjectId::from_hash([1; 20]);
        let text = render_log(&[entry(1, "first", None)], false);
        assert_eq!(
            text,
            format!(
                "Commit: {id}\nDate: Mon Jan 02 15:04:05 2006\nMessage: first\n{}",
                "-".repeat(48)
            )
        );
    }

    #[test]
    fn log_oneline_layout() {
        plain();
        let first = ObjectId::from_hash([1; 20]);
        let text = render_log(&[entry(2, "second", Some(first)), entry(1, "first", None)], true);
        assert_eq!(text, "02020202 second\n01010101 first");
    }

    #[test]
    fn empty_log_and_status() {
        plain();
        assert_eq!(render_log(&[], false), "No commits yet.");
        assert_eq!(render_status(&Manifest::new()), "No changes staged.");
    }

    #[test]
    fn diff_notices() {
        plain();
        let commit = ObjectId::from_hash([1; 20]);
        assert_eq!(
            render_diff(&DiffOutcome::FirstCommit { commit }),
            "This is the first commit. No parent commit found."
        );
        assert_eq!(
            render_diff(&DiffOutcome::NoChanges {
                commit,
                parent: commit
            }),
            "No changes detected."
        );
    }

    #[test]
    fn end_to_end_through_the_repository() {
        plain();
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path(), &RepoConfig::default())
            .unwrap()
            .into_repository();
        std::fs::write(dir.path().join("a.txt"), "hello").unwrap();
        repo.add("a.txt").unwrap();
        repo.commit("first").unwrap();
        std::fs::write(dir.path().join("a.txt"), "hello world").unwrap();
        repo.add("a.txt").unwrap();
        repo.commit("second").unwrap();

        let text = render_diff(&repo.diff_head().unwrap());
        assert!(text.contains("diff --lvc a.txt"));
        assert!(text.contains("\n-hello\n+hello world"));

        let report = render_verify(&repo.verify().unwrap());
        assert!(report.contains("2 commits"));
    }
}
