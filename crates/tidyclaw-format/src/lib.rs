//! Settings-document formatting: sorted keys, dead-path cleanup, and the
//! permission sweep.

mod clean;
mod stats;

pub use stats::FormatStats;

use serde_json::Value;
use std::sync::Arc;
use tidyclaw_sweep::{PermissionSweeper, SweepOptions};
use tidyclaw_types::{PathChecker, TidyError};
use tokio_util::sync::CancellationToken;

/// A formatted document plus what changed.
#[derive(Debug, Clone)]
pub struct FormatResult {
    pub data: Vec<u8>,
    pub stats: FormatStats,
}

/// Parse `data` as JSON and re-serialize it with two-space indentation and
/// recursively sorted keys.
pub fn format_json(data: &[u8]) -> Result<Vec<u8>, TidyError> {
    let value: Value = serde_json::from_slice(data)?;
    render(&value)
}

fn render(value: &Value) -> Result<Vec<u8>, TidyError> {
    // serde_json's default object map is ordered by key, so nested objects
    // come out sorted.
    let mut out = serde_json::to_vec_pretty(value)?;
    out.push(b'\n');
    Ok(out)
}

/// Formats settings documents: sweeps stale permission entries, optionally
/// prunes dead project/repository paths, and rewrites the JSON with sorted
/// keys.
pub struct Formatter {
    checker: Arc<dyn PathChecker>,
    sweeper: PermissionSweeper,
}

impl Formatter {
    pub fn new(checker: Arc<dyn PathChecker>, options: SweepOptions) -> Self {
        let sweeper = PermissionSweeper::new(Arc::clone(&checker), options);
        Self { checker, sweeper }
    }

    /// Format one document. With `clean_paths` the top-level `projects` and
    /// `githubRepoPaths` maps are additionally pruned (the `~/.claude.json`
    /// shape); plain settings files only get the permission sweep.
    pub fn format(
        &self,
        ctx: &CancellationToken,
        data: &[u8],
        clean_paths: bool,
    ) -> Result<FormatResult, TidyError> {
        let mut value: Value = serde_json::from_slice(data)?;
        let mut stats = FormatStats {
            cleaned_paths: clean_paths,
            ..Default::default()
        };

        if clean_paths {
            if let Some(obj) = value.as_object_mut() {
                let projects = clean::clean_projects(ctx, &self.checker, obj);
                stats.projects_before = projects.before;
                stats.projects_after = projects.after;

                let repos = clean::clean_repo_paths(ctx, &self.checker, obj);
                stats.repo_paths_removed = repos.removed_paths;
                stats.empty_repos_removed = repos.removed_repos;
            }
        }

        let sweep = self.sweeper.sweep(ctx, &mut value);
        stats.swept_allow = sweep.swept_allow;
        stats.swept_ask = sweep.swept_ask;
        stats.warned = sweep.warned;

        Ok(FormatResult {
            data: render(&value)?,
            stats,
        })
    }
}
