//! Dead-path cleanup for the project and repository maps of
//! `~/.claude.json`-style documents.

use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;
use tidyclaw_types::PathChecker;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ProjectsStats {
    pub before: usize,
    pub after: usize,
}

/// Remove `projects` entries whose key (an absolute path) no longer exists.
/// The map is written back, created empty when absent.
pub(crate) fn clean_projects(
    ctx: &CancellationToken,
    checker: &Arc<dyn PathChecker>,
    doc: &mut Map<String, Value>,
) -> ProjectsStats {
    let map = doc
        .get("projects")
        .and_then(|v| v.as_object())
        .cloned()
        .unwrap_or_default();
    let before = map.len();

    let kept: Map<String, Value> = map
        .into_iter()
        .filter(|(path, _)| checker.exists(ctx, Path::new(path)))
        .collect();
    let after = kept.len();

    doc.insert("projects".to_string(), Value::Object(kept));
    ProjectsStats { before, after }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RepoPathsStats {
    pub removed_paths: usize,
    pub removed_repos: usize,
}

/// Prune the `githubRepoPaths` map (repo name to a list of checkout paths):
/// dead paths are dropped, and repos left with no paths are dropped with
/// them. Non-string list elements are kept unchanged.
pub(crate) fn clean_repo_paths(
    ctx: &CancellationToken,
    checker: &Arc<dyn PathChecker>,
    doc: &mut Map<String, Value>,
) -> RepoPathsStats {
    let map = doc
        .get("githubRepoPaths")
        .and_then(|v| v.as_object())
        .cloned()
        .unwrap_or_default();

    let mut stats = RepoPathsStats::default();
    let mut cleaned = Map::new();
    for (repo, value) in map {
        let Some(paths) = value.as_array() else {
            cleaned.insert(repo, value);
            continue;
        };

        let kept: Vec<Value> = paths
            .iter()
            .filter(|p| match p.as_str() {
                Some(s) => checker.exists(ctx, Path::new(s)),
                None => true,
            })
            .cloned()
            .collect();
        stats.removed_paths += paths.len() - kept.len();

        if kept.is_empty() {
            stats.removed_repos += 1;
        } else {
            cleaned.insert(repo, Value::Array(kept));
        }
    }

    doc.insert("githubRepoPaths".to_string(), Value::Object(cleaned));
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    struct CheckerFor(Vec<PathBuf>);

    impl PathChecker for CheckerFor {
        fn exists(&self, _ctx: &CancellationToken, path: &Path) -> bool {
            self.0.iter().any(|p| p == path)
        }
    }

    fn checker_for(paths: &[&str]) -> Arc<dyn PathChecker> {
        Arc::new(CheckerFor(paths.iter().map(PathBuf::from).collect()))
    }

    fn as_map(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_clean_projects_removes_dead_entries() {
        let mut doc = as_map(json!({
            "projects": {
                "/alive/project": {"key": "value"},
                "/gone/project": {"key": "value"},
            }
        }));
        let ctx = CancellationToken::new();
        let stats = clean_projects(&ctx, &checker_for(&["/alive/project"]), &mut doc);
        assert_eq!(stats.before, 2);
        assert_eq!(stats.after, 1);
        assert_eq!(
            doc["projects"],
            json!({"/alive/project": {"key": "value"}})
        );
    }

    #[test]
    fn test_clean_projects_creates_empty_map_when_absent() {
        let mut doc = as_map(json!({"other": 1}));
        let ctx = CancellationToken::new();
        let stats = clean_projects(&ctx, &checker_for(&[]), &mut doc);
        assert_eq!(stats.before, 0);
        assert_eq!(doc["projects"], json!({}));
    }

    #[test]
    fn test_clean_repo_paths_drops_dead_paths_and_empty_repos() {
        let mut doc = as_map(json!({
            "githubRepoPaths": {
                "org/repo-a": ["/alive/checkout", "/gone/checkout"],
                "org/repo-b": ["/gone/checkout"],
            }
        }));
        let ctx = CancellationToken::new();
        let stats = clean_repo_paths(&ctx, &checker_for(&["/alive/checkout"]), &mut doc);
        assert_eq!(stats.removed_paths, 2);
        assert_eq!(stats.removed_repos, 1);
        assert_eq!(
            doc["githubRepoPaths"],
            json!({"org/repo-a": ["/alive/checkout"]})
        );
    }

    #[test]
    fn test_clean_repo_paths_keeps_non_array_values() {
        let mut doc = as_map(json!({"githubRepoPaths": {"org/weird": "not a list"}}));
        let ctx = CancellationToken::new();
        let stats = clean_repo_paths(&ctx, &checker_for(&[]), &mut doc);
        assert_eq!(stats.removed_paths, 0);
        assert_eq!(doc["githubRepoPaths"], json!({"org/weird": "not a list"}));
    }
}
