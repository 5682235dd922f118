//! Tool resolvers — per-tool strategies for judging whether a permission
//! specifier still points at something real.

use crate::entry::contains_glob;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tidyclaw_types::PathChecker;
use tokio_util::sync::CancellationToken;

/// Outcome of resolving one specifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// True when the specifier's target no longer exists and the entry
    /// should be removed.
    pub sweep: bool,
    /// Set when the specifier cannot be judged with the configured context.
    /// Warned entries are always kept, whatever `sweep` says.
    pub warn: Option<String>,
}

impl Resolution {
    fn keep() -> Self {
        Self::default()
    }

    fn swept() -> Self {
        Self {
            sweep: true,
            warn: None,
        }
    }

    fn warned(message: impl Into<String>) -> Self {
        Self {
            sweep: false,
            warn: Some(message.into()),
        }
    }
}

/// Per-tool resolution strategy.
///
/// One resolver is registered per tool name; the same instance may serve
/// several names (`Read`, `Edit`, and `Write` share a path resolver).
pub trait ToolResolver: Send + Sync {
    fn resolve(&self, ctx: &CancellationToken, specifier: &str) -> Resolution;
}

/// Resolver for tools whose specifier is a single path.
///
/// Specifier forms, in order of precedence:
/// - contains `*`, `?`, or `[` — a glob, kept without resolution
/// - `//path` — absolute path
/// - `~/path` — relative to the home directory
/// - `/path`, `./path`, `../path`, bare `path` — relative to the project
///   base directory
///
/// Home- and project-relative forms produce a warning when the needed
/// directory is not configured; the entry is then kept.
pub struct PathResolver {
    checker: Arc<dyn PathChecker>,
    home_dir: Option<PathBuf>,
    base_dir: Option<PathBuf>,
}

impl PathResolver {
    pub fn new(
        checker: Arc<dyn PathChecker>,
        home_dir: Option<PathBuf>,
        base_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            checker,
            home_dir,
            base_dir,
        }
    }

    fn check(&self, ctx: &CancellationToken, path: &Path) -> Resolution {
        if self.checker.exists(ctx, path) {
            Resolution::keep()
        } else {
            Resolution::swept()
        }
    }
}

impl ToolResolver for PathResolver {
    fn resolve(&self, ctx: &CancellationToken, specifier: &str) -> Resolution {
        if contains_glob(specifier) {
            return Resolution::keep();
        }

        if let Some(rest) = specifier.strip_prefix("//") {
            return self.check(ctx, Path::new(&format!("/{rest}")));
        }

        if let Some(rest) = specifier.strip_prefix("~/") {
            return match &self.home_dir {
                Some(home) => self.check(ctx, &home.join(rest)),
                None => Resolution::warned("home directory not configured"),
            };
        }

        // Leading `/` is project-relative in this grammar, not absolute.
        match &self.base_dir {
            Some(base) => self.check(ctx, &base.join(specifier.trim_start_matches('/'))),
            None => Resolution::warned("project base directory not configured"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct AlwaysFalse;

    impl PathChecker for AlwaysFalse {
        fn exists(&self, _ctx: &CancellationToken, _path: &Path) -> bool {
            false
        }
    }

    struct CheckerFor(HashSet<PathBuf>);

    impl PathChecker for CheckerFor {
        fn exists(&self, _ctx: &CancellationToken, path: &Path) -> bool {
            self.0.contains(path)
        }
    }

    fn checker_for(paths: &[&str]) -> Arc<dyn PathChecker> {
        Arc::new(CheckerFor(paths.iter().map(PathBuf::from).collect()))
    }

    fn resolver(
        checker: Arc<dyn PathChecker>,
        home: Option<&str>,
        base: Option<&str>,
    ) -> PathResolver {
        PathResolver::new(checker, home.map(PathBuf::from), base.map(PathBuf::from))
    }

    #[test]
    fn test_dead_absolute_path_is_swept() {
        let r = resolver(Arc::new(AlwaysFalse), None, None);
        let res = r.resolve(&CancellationToken::new(), "//dead/path");
        assert!(res.sweep);
        assert!(res.warn.is_none());
    }

    #[test]
    fn test_existing_absolute_path_is_kept() {
        let r = resolver(checker_for(&["/alive/path"]), None, None);
        let res = r.resolve(&CancellationToken::new(), "//alive/path");
        assert!(!res.sweep);
    }

    #[test]
    fn test_home_relative_with_home_dir_is_resolved() {
        let r = resolver(Arc::new(AlwaysFalse), Some("/home/user"), None);
        let res = r.resolve(&CancellationToken::new(), "~/config.json");
        assert!(res.sweep);
    }

    #[test]
    fn test_existing_home_relative_is_kept() {
        let r = resolver(checker_for(&["/home/user/config.json"]), Some("/home/user"), None);
        let res = r.resolve(&CancellationToken::new(), "~/config.json");
        assert!(!res.sweep);
    }

    #[test]
    fn test_home_relative_without_home_dir_warns() {
        let r = resolver(Arc::new(AlwaysFalse), None, None);
        let res = r.resolve(&CancellationToken::new(), "~/config.json");
        assert!(!res.sweep);
        assert!(res.warn.is_some());
    }

    #[test]
    fn test_relative_with_base_dir_is_resolved() {
        let r = resolver(Arc::new(AlwaysFalse), None, Some("/project"));
        let res = r.resolve(&CancellationToken::new(), "./src/main.rs");
        assert!(res.sweep);
    }

    #[test]
    fn test_relative_without_base_dir_warns() {
        let r = resolver(Arc::new(AlwaysFalse), None, None);
        let res = r.resolve(&CancellationToken::new(), "./src/main.rs");
        assert!(!res.sweep);
        assert!(res.warn.is_some());
    }

    #[test]
    fn test_parent_relative_with_base_dir_is_resolved() {
        let r = resolver(Arc::new(AlwaysFalse), None, Some("/project"));
        let res = r.resolve(&CancellationToken::new(), "../other/file.rs");
        assert!(res.sweep);
    }

    #[test]
    fn test_slash_prefixed_path_resolves_against_base_dir() {
        let r = resolver(checker_for(&["/project/src/file.rs"]), None, Some("/project"));
        let res = r.resolve(&CancellationToken::new(), "/src/file.rs");
        assert!(!res.sweep);
    }

    #[test]
    fn test_bare_relative_path_resolves_against_base_dir() {
        let r = resolver(checker_for(&["/project/README.md"]), None, Some("/project"));
        let res = r.resolve(&CancellationToken::new(), "README.md");
        assert!(!res.sweep);
    }

    #[test]
    fn test_glob_is_kept_without_resolution() {
        let r = resolver(Arc::new(AlwaysFalse), Some("/home/user"), Some("/project"));
        let res = r.resolve(&CancellationToken::new(), "**/*.ts");
        assert_eq!(res, Resolution::keep());
    }
}
