//! Permission-entry syntax: `ToolName(Specifier)`.

use regex::Regex;
use std::sync::LazyLock;

static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^([A-Za-z][A-Za-z0-9_]*)\((.*)\)$").expect("entry regex")
});

/// Split a permission entry into its tool name and specifier.
///
/// Matches `ToolName(Specifier)` where the tool name starts with a letter
/// and continues with letters, digits, or underscores. The specifier is
/// everything up to the final `)` — greedy, so specifiers containing
/// parentheses (a shell command, say) stay intact.
///
/// Returns `None` for anything else: empty strings, bare tool names,
/// names starting with a digit. A non-match is never an error.
pub fn parse_entry(entry: &str) -> Option<(&str, &str)> {
    let caps = ENTRY_RE.captures(entry)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Whether `s` contains a glob metacharacter (`*`, `?`, `[`).
///
/// Glob specifiers describe many targets at once and are never resolved
/// against the filesystem.
pub fn contains_glob(s: &str) -> bool {
    s.contains(['*', '?', '['])
}
