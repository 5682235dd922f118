//! The sweep engine — walks the `allow` and `ask` permission arrays and
//! removes entries whose targets no longer exist.

use crate::entry::parse_entry;
use crate::resolver::{PathResolver, ToolResolver};
use crate::skill::{SkillNameSet, SkillResolver};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tidyclaw_types::PathChecker;
use tokio_util::sync::CancellationToken;

/// Aggregate outcome of one sweep pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepResult {
    /// Entries removed from `permissions.allow`.
    pub swept_allow: usize,
    /// Entries removed from `permissions.ask`.
    pub swept_ask: usize,
    /// Original text of entries that could not be judged with the
    /// configured context. Warned entries are kept, never counted as swept.
    pub warned: Vec<String>,
}

/// Optional context for building a [`PermissionSweeper`].
#[derive(Debug, Clone, Default)]
pub struct SweepOptions {
    /// Resolves `~/` specifiers. Without it they are warned and kept.
    pub home_dir: Option<PathBuf>,
    /// Resolves project-relative specifiers. Without it they are warned
    /// and kept.
    pub base_dir: Option<PathBuf>,
    /// Known skill/command names. When present, a skill resolver is
    /// registered for the `Skill` tool.
    pub skills: Option<SkillNameSet>,
}

enum Judgement {
    Keep,
    Sweep,
    Warn(String),
}

/// Sweeps stale entries from the `allow` and `ask` arrays of a settings
/// document's `permissions` object.
///
/// Resolution is dispatched per tool name: `Read`, `Edit`, and `Write`
/// share one path resolver; `Skill` gets a registry-backed resolver when a
/// skill set is supplied. The resolver table is an allow-list — tools
/// without an entry are never swept, because their specifier semantics are
/// unknown. `deny` is never inspected: denials are explicit prohibitions,
/// and pruning one could silently re-enable a blocked action.
pub struct PermissionSweeper {
    resolvers: HashMap<String, Arc<dyn ToolResolver>>,
}

impl PermissionSweeper {
    /// Create a sweeper with the standard resolver registrations.
    pub fn new(checker: Arc<dyn PathChecker>, options: SweepOptions) -> Self {
        let mut resolvers: HashMap<String, Arc<dyn ToolResolver>> = HashMap::new();

        let paths: Arc<dyn ToolResolver> = Arc::new(PathResolver::new(
            checker,
            options.home_dir,
            options.base_dir,
        ));
        for tool in ["Read", "Edit", "Write"] {
            resolvers.insert(tool.to_string(), Arc::clone(&paths));
        }

        if let Some(skills) = options.skills {
            resolvers.insert("Skill".to_string(), Arc::new(SkillResolver::new(skills)));
        }

        Self { resolvers }
    }

    /// Register (or replace) the resolver for a tool name.
    pub fn register(&mut self, tool: impl Into<String>, resolver: Arc<dyn ToolResolver>) {
        self.resolvers.insert(tool.into(), resolver);
    }

    /// Sweep the document in place, returning what was removed and warned.
    ///
    /// Malformed shapes (missing `permissions`, non-object `permissions`,
    /// non-array categories) degrade to a no-op for that piece. On
    /// cancellation the pass aborts between entries: fully processed
    /// categories are committed, the in-flight one is left untouched, and
    /// the partial result accumulated so far is returned.
    pub fn sweep(&self, ctx: &CancellationToken, document: &mut Value) -> SweepResult {
        let mut result = SweepResult::default();

        let Some(perms) = document
            .get_mut("permissions")
            .and_then(|v| v.as_object_mut())
        else {
            return result;
        };

        for category in ["allow", "ask"] {
            let Some(entries) = perms.get(category).and_then(|v| v.as_array()).cloned() else {
                continue;
            };

            let mut kept = Vec::with_capacity(entries.len());
            let mut swept = 0usize;
            let mut warned = Vec::new();
            let mut cancelled = false;

            for value in entries {
                if ctx.is_cancelled() {
                    cancelled = true;
                    break;
                }
                match self.judge(ctx, &value) {
                    Judgement::Keep => kept.push(value),
                    Judgement::Warn(entry) => {
                        warned.push(entry);
                        kept.push(value);
                    }
                    Judgement::Sweep => swept += 1,
                }
            }

            if cancelled {
                return result;
            }

            // Survivors keep their original relative order.
            perms.insert(category.to_string(), Value::Array(kept));
            match category {
                "allow" => result.swept_allow += swept,
                _ => result.swept_ask += swept,
            }
            result.warned.append(&mut warned);
        }

        result
    }

    fn judge(&self, ctx: &CancellationToken, value: &Value) -> Judgement {
        let Some(entry) = value.as_str() else {
            return Judgement::Keep;
        };
        let Some((tool, specifier)) = parse_entry(entry) else {
            return Judgement::Keep;
        };
        let Some(resolver) = self.resolvers.get(tool) else {
            return Judgement::Keep;
        };

        let resolution = resolver.resolve(ctx, specifier);
        if resolution.warn.is_some() {
            return Judgement::Warn(entry.to_string());
        }
        if resolution.sweep {
            tracing::debug!("sweeping stale permission entry: {entry}");
            Judgement::Sweep
        } else {
            Judgement::Keep
        }
    }
}
