//! Composition plan
//!
//! A plan is the full record of one composition — resolved directories
//! and composed tokens — computed without touching the environment. It
//! serves two purposes: a dry-run/audit surface (serialize it and look),
//! and the staging half of the atomicity guarantee: all validation and
//! composition happens at plan time, so by the time the environment is
//! written nothing can fail.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::compose::{compose_flags, FlagToken};
use crate::env::{merge_flags, ApplyReport, EnvTable};
use crate::profile::{Arch, ConfigError, FlagStyle, ToolchainProfile};
use crate::resolver::{resolve_search_paths, SearchPath};

/// Record of one composition, computed before any environment write
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositionPlan {
    /// Staging root the directories were resolved under
    pub root: PathBuf,

    /// Target architecture
    pub arch: Arch,

    /// Flags variable the plan targets
    pub flags_var: String,

    /// Token separator
    pub separator: String,

    /// Directive syntax used
    pub flag_style: FlagStyle,

    /// Resolved directories, in search order
    pub paths: Vec<SearchPath>,

    /// Composed directives, one per path, same order
    pub tokens: Vec<FlagToken>,
}

/// Build a plan from a profile
///
/// Validates, resolves, and composes; reads and writes nothing.
pub fn plan(profile: &ToolchainProfile) -> Result<CompositionPlan, ConfigError> {
    let paths = resolve_search_paths(profile)?;
    let tokens = compose_flags(&paths, profile.flag_style);
    Ok(CompositionPlan {
        root: profile.root.clone(),
        arch: profile.arch.clone(),
        flags_var: profile.flags_var.clone(),
        separator: profile.separator.clone(),
        flag_style: profile.flag_style,
        paths,
        tokens,
    })
}

impl CompositionPlan {
    /// Merge this plan's tokens into the environment
    ///
    /// One read-modify-write of the flags variable; infallible because
    /// everything that can fail already failed at plan time.
    pub fn apply(&self, env: &mut dyn EnvTable) -> ApplyReport {
        let existing = env.get(&self.flags_var);
        let outcome = merge_flags(existing.as_deref(), &self.tokens, &self.separator);
        env.set(&self.flags_var, &outcome.value);
        ApplyReport {
            var: self.flags_var.clone(),
            value: outcome.value,
            appended: outcome.appended,
            skipped: outcome.skipped,
        }
    }

    /// Serialize for audit output
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
