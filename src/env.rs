//! Environment merging
//!
//! The merger is the only code in this crate that touches prior state: it
//! reads the current value of the flags variable, skips tokens whose
//! directory is already represented, appends the rest, and writes the
//! variable back in one read-modify-write. Pre-existing content is never
//! removed or reordered, only appended after.
//!
//! All environment access goes through [`EnvTable`], so tests and dry runs
//! can run against an in-memory table instead of the real process.

use std::collections::BTreeMap;

use crate::compose::FlagToken;
use crate::profile::{ConfigError, FlagStyle, ToolchainProfile};

/// Read/write access to an environment table
pub trait EnvTable {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&mut self, name: &str, value: &str);
}

/// The invoking process's own environment table
///
/// Variables set here are inherited by any child process spawned
/// afterward, which is the whole point: the downstream compiler/linker
/// invocation reads the flags variable at link time.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvTable for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn set(&mut self, name: &str, value: &str) {
        std::env::set_var(name, value);
    }
}

/// In-memory environment table for tests and dry runs
#[derive(Debug, Default, Clone)]
pub struct MemoryEnv {
    vars: BTreeMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvTable for MemoryEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }
}

/// Result of one merge: the new value plus what was appended and what was
/// skipped as already present
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// The full new value of the flags variable
    pub value: String,

    /// Tokens appended, in order
    pub appended: Vec<FlagToken>,

    /// Tokens skipped because their directory was already represented;
    /// a non-fatal no-op, not an error
    pub skipped: Vec<FlagToken>,
}

/// Merge new tokens onto an existing flags value
///
/// Pure function over strings, no environment access. An absent existing
/// value and an empty one are equivalent: the result carries no leading
/// or trailing separator. Dedup is keyed by resolved directory rather
/// than verbatim token text, so a directory already present under a
/// different [`FlagStyle`] is still skipped.
pub fn merge_flags(existing: Option<&str>, tokens: &[FlagToken], separator: &str) -> MergeOutcome {
    let existing = existing.unwrap_or("").to_string();
    let present = directives_in(&existing, separator);

    let mut appended = Vec::new();
    let mut skipped = Vec::new();
    for token in tokens {
        let dir = token.dir.display().to_string();
        if present.contains(&dir) || existing.split(separator).any(|t| t == token.token) {
            skipped.push(token.clone());
        } else {
            appended.push(token.clone());
        }
    }

    let mut value = existing;
    for token in &appended {
        if !value.is_empty() {
            value.push_str(separator);
        }
        value.push_str(&token.token);
    }

    MergeOutcome {
        value,
        appended,
        skipped,
    }
}

/// Directories named by recognizable search directives in an existing
/// flags value
///
/// Anything that does not look like a search directive is left opaque;
/// the merger never interprets, splits, or rewrites the rest of the
/// value.
///
/// Directories containing the separator (a space under the default
/// configuration) cannot be recovered from the existing value, so such a
/// directory is not recognized as already present. A space-separated
/// flags variable cannot represent such a path for the downstream
/// toolchain either, so nothing usable is lost.
fn directives_in(existing: &str, separator: &str) -> Vec<String> {
    existing
        .split(separator)
        .flat_map(|t| t.split_ascii_whitespace())
        .filter_map(|t| {
            FlagStyle::known_prefixes()
                .iter()
                .find_map(|p| t.strip_prefix(p))
        })
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}

/// Record of one application of a profile to an environment
#[derive(Debug, Clone)]
pub struct ApplyReport {
    /// Name of the flags variable that was written
    pub var: String,

    /// The value written
    pub value: String,

    /// Tokens appended this time
    pub appended: Vec<FlagToken>,

    /// Tokens skipped as already present (re-application is a no-op)
    pub skipped: Vec<FlagToken>,
}

/// Apply a profile to an environment: the single merger entry point
///
/// Runs the full resolver → composer → merger pipeline and performs one
/// read-modify-write of the flags variable. Atomic with respect to
/// validation: on any [`ConfigError`] the environment is left exactly as
/// it was. Applying the identical profile twice yields the same final
/// value as applying it once.
pub fn apply(
    profile: &ToolchainProfile,
    env: &mut dyn EnvTable,
) -> Result<ApplyReport, ConfigError> {
    Ok(crate::plan::plan(profile)?.apply(env))
}
