//! Formatting statistics and the human-readable summary.

use std::fmt::Write as _;
use std::path::Path;

/// What one formatting pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatStats {
    pub projects_before: usize,
    pub projects_after: usize,
    pub repo_paths_removed: usize,
    pub empty_repos_removed: usize,
    pub swept_allow: usize,
    pub swept_ask: usize,
    /// Permission entries kept because they could not be resolved.
    pub warned: Vec<String>,
    /// Whether the projects/repo-paths cleanup ran for this document.
    pub cleaned_paths: bool,
}

impl FormatStats {
    /// Render the per-file summary printed by the CLI.
    pub fn summary(&self, backup_path: Option<&Path>) -> String {
        let mut out = String::new();
        if self.cleaned_paths {
            let removed = self.projects_before - self.projects_after;
            let _ = writeln!(
                out,
                "Projects: {} -> {} (removed {})",
                self.projects_before, self.projects_after, removed
            );
            let _ = writeln!(
                out,
                "Repo paths: removed {} paths, {} empty repos",
                self.repo_paths_removed, self.empty_repos_removed
            );
        }
        if self.swept_allow > 0 || self.swept_ask > 0 {
            let _ = writeln!(
                out,
                "Permissions: removed {} allow, {} ask",
                self.swept_allow, self.swept_ask
            );
        }
        for entry in &self.warned {
            let _ = writeln!(out, "Kept (unresolved): {entry}");
        }
        let _ = writeln!(out, "Keys sorted recursively.");
        if let Some(path) = backup_path {
            let _ = writeln!(out, "Backup: {}", path.display());
        }
        out
    }
}
