//! Skill registry and the resolver for `Skill` permission entries.

use crate::resolver::{Resolution, ToolResolver};
use std::collections::HashSet;
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Set of known skill and command names. Built once per invocation and
/// treated as read-only for the duration of a sweep.
pub type SkillNameSet = HashSet<String>;

/// Scan `agent_dir` for skills and commands, returning the set of names.
///
/// Skills are subdirectories of `<agent_dir>/skills/` containing a
/// `SKILL.md` file; the subdirectory name is the skill name. Commands are
/// `.md` files in `<agent_dir>/commands/`; the file stem is the command
/// name. Absent or unreadable directories contribute nothing, so the
/// result may be empty — which disables skill sweeping entirely.
pub fn load_skill_names(agent_dir: &Path) -> SkillNameSet {
    let mut set = SkillNameSet::new();
    load_skills_dir(&agent_dir.join("skills"), &mut set);
    load_commands_dir(&agent_dir.join("commands"), &mut set);
    set
}

fn load_skills_dir(dir: &Path, set: &mut SkillNameSet) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() || !path.join("SKILL.md").is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            set.insert(name.to_string());
        }
    }
}

fn load_commands_dir(dir: &Path, set: &mut SkillNameSet) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            if !stem.is_empty() {
                set.insert(stem.to_string());
            }
        }
    }
}

/// Resolver for `Skill(name)` entries.
///
/// The specifier is a skill or command name, optionally followed by a
/// space-separated qualifier (`name *`); only the name decides.
pub struct SkillResolver {
    skills: SkillNameSet,
}

impl SkillResolver {
    pub fn new(skills: SkillNameSet) -> Self {
        Self { skills }
    }
}

impl ToolResolver for SkillResolver {
    fn resolve(&self, _ctx: &CancellationToken, specifier: &str) -> Resolution {
        let (name, _) = specifier.split_once(' ').unwrap_or((specifier, ""));

        // Plugin-qualified skills ("plugin:name") belong to the plugin
        // system and are never swept locally.
        if name.contains(':') {
            return Resolution::default();
        }

        // An empty registry means the directory scan found nothing or never
        // ran; sweeping on that basis would delete every skill grant.
        if self.skills.is_empty() {
            return Resolution::default();
        }

        if self.skills.contains(name) {
            Resolution::default()
        } else {
            Resolution {
                sweep: true,
                warn: None,
            }
        }
    }
}
