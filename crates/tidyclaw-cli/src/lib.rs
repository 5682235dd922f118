//! Target resolution, file rewriting, and reporting for the tidyclaw CLI.

use chrono::Local;
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tidyclaw_format::{FormatResult, Formatter};
use tidyclaw_sweep::{SweepOptions, load_skill_names};
use tidyclaw_types::{PathChecker, TidyError};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Parser)]
#[command(
    name = "tidyclaw",
    version,
    about = "Tidies agent settings files: sorts keys, prunes dead paths, sweeps stale permissions"
)]
pub struct Cli {
    /// Format a specific file instead of the default targets
    #[arg(short, long)]
    pub target: Option<PathBuf>,

    /// Write a timestamped backup before modifying a file
    #[arg(long)]
    pub backup: bool,

    /// Show what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose/debug logging
    #[arg(long)]
    pub verbose: bool,
}

struct TargetFile {
    path: PathBuf,
    /// Whether the projects/repo-paths cleanup applies (the `.claude.json`
    /// shape, as opposed to plain settings files).
    clean_paths: bool,
}

struct FileOutcome {
    original: Vec<u8>,
    result: FormatResult,
    backup_path: Option<PathBuf>,
}

/// Process every target: read, format, and (unless `--dry-run`) rewrite.
///
/// With the default target list, files that do not exist are reported and
/// skipped; an explicit `--target` that is missing is an error.
pub fn run(
    cli: &Cli,
    home: &Path,
    checker: Arc<dyn PathChecker>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let ctx = CancellationToken::new();
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // The skill registry is built once per invocation and shared across
    // every swept file.
    let skills = load_skill_names(&home.join(".claude"));
    let formatter = Formatter::new(
        checker,
        SweepOptions {
            home_dir: Some(home.to_path_buf()),
            base_dir: Some(cwd.clone()),
            skills: Some(skills),
        },
    );

    let targets = resolve_targets(cli, home, &cwd);
    let single = targets.len() == 1;

    for target in &targets {
        match process_file(cli, &formatter, &ctx, target) {
            Ok(outcome) => print_outcome(out, target, &outcome, single)?,
            Err(TidyError::NotFound { .. }) if !single => {
                writeln!(out, "{}: skipped (not found)\n", target.path.display())?;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn resolve_targets(cli: &Cli, home: &Path, cwd: &Path) -> Vec<TargetFile> {
    if let Some(path) = &cli.target {
        let clean_paths = path.file_name().and_then(|n| n.to_str()) == Some(".claude.json");
        return vec![TargetFile {
            path: path.clone(),
            clean_paths,
        }];
    }
    vec![
        TargetFile {
            path: home.join(".claude.json"),
            clean_paths: true,
        },
        TargetFile {
            path: home.join(".claude/settings.json"),
            clean_paths: false,
        },
        TargetFile {
            path: home.join(".claude/settings.local.json"),
            clean_paths: false,
        },
        TargetFile {
            path: cwd.join(".claude/settings.json"),
            clean_paths: false,
        },
        TargetFile {
            path: cwd.join(".claude/settings.local.json"),
            clean_paths: false,
        },
    ]
}

fn process_file(
    cli: &Cli,
    formatter: &Formatter,
    ctx: &CancellationToken,
    target: &TargetFile,
) -> Result<FileOutcome, TidyError> {
    let metadata = std::fs::metadata(&target.path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TidyError::NotFound {
                path: target.path.display().to_string(),
            }
        } else {
            TidyError::Io(e)
        }
    })?;
    let permissions = metadata.permissions();

    let original = std::fs::read(&target.path)?;
    let result = formatter.format(ctx, &original, target.clean_paths)?;

    let mut backup_path = None;
    if !cli.dry_run {
        if cli.backup {
            let path = PathBuf::from(format!(
                "{}.backup.{}",
                target.path.display(),
                Local::now().format("%Y%m%d%H%M%S")
            ));
            std::fs::write(&path, &original)?;
            std::fs::set_permissions(&path, permissions.clone())?;
            backup_path = Some(path);
        }
        std::fs::write(&target.path, &result.data)?;
        // The rewritten file keeps the original mode.
        std::fs::set_permissions(&target.path, permissions)?;
    }

    Ok(FileOutcome {
        original,
        result,
        backup_path,
    })
}

fn print_outcome(
    out: &mut dyn Write,
    target: &TargetFile,
    outcome: &FileOutcome,
    single: bool,
) -> std::io::Result<()> {
    let summary = outcome.result.stats.summary(outcome.backup_path.as_deref());
    if single {
        return write!(out, "{summary}");
    }
    if outcome.original == outcome.result.data {
        return writeln!(out, "{}:\n  (no changes)\n", target.path.display());
    }
    writeln!(out, "{}:", target.path.display())?;
    for line in summary.lines().filter(|l| !l.is_empty()) {
        writeln!(out, "  {line}")?;
    }
    writeln!(out)
}
