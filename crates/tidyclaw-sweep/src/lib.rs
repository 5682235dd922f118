//! Stale-reference sweeping for agent settings documents.
//!
//! Permission entries have the shape `ToolName(Specifier)`. A resolver
//! registered per tool name decides whether a specifier still points at
//! something real; entries whose targets are gone are removed from the
//! `allow` and `ask` arrays of the document's `permissions` object.
//! `deny` entries are never touched, and tools without a registered
//! resolver are never swept.

pub mod engine;
pub mod entry;
pub mod resolver;
pub mod skill;

pub use engine::{PermissionSweeper, SweepOptions, SweepResult};
pub use entry::{contains_glob, parse_entry};
pub use resolver::{PathResolver, Resolution, ToolResolver};
pub use skill::{SkillNameSet, SkillResolver, load_skill_names};
