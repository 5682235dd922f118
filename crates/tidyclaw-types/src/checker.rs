//! Path-existence capability consulted by the sweep and cleanup passes.

use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Answers whether a filesystem path currently exists.
///
/// Implementations must be side-effect free lookups: the sweep engine
/// consults the checker at most once per resolvable specifier within one
/// pass, and identical answers must yield identical sweep results.
pub trait PathChecker: Send + Sync {
    fn exists(&self, ctx: &CancellationToken, path: &Path) -> bool;
}

/// `PathChecker` backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsPathChecker;

impl PathChecker for FsPathChecker {
    fn exists(&self, _ctx: &CancellationToken, path: &Path) -> bool {
        path.exists()
    }
}
