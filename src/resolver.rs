//! Path resolution
//!
//! Turns a validated profile into the ordered list of absolute search
//! directories, one per library component. Pure string composition: the
//! resolver never touches the filesystem and never checks that a resolved
//! directory exists — a missing directory surfaces as the downstream
//! toolchain's own link-time error (verifying staged-SDK completeness is
//! the staging tool's problem, not this crate's).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::profile::{ConfigError, ToolchainProfile};

/// One resolved search directory
///
/// Computed fresh per invocation, never persisted. Order in the resolver
/// output equals component declaration order: first declared = highest
/// search priority, matching first-match-wins linker semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPath {
    /// Name of the component this directory came from
    pub component: String,

    /// Absolute directory: root joined with the expanded template
    pub dir: PathBuf,
}

/// Resolve the profile's components into absolute search directories
///
/// Validates the profile first; on any [`ConfigError`] nothing is
/// resolved. Two components expanding to the same directory are rejected
/// so that no directory is resolved twice within one composition.
pub fn resolve_search_paths(profile: &ToolchainProfile) -> Result<Vec<SearchPath>, ConfigError> {
    profile.validate()?;

    let mut paths: Vec<SearchPath> = Vec::with_capacity(profile.components.len());
    for component in &profile.components {
        let dir = profile.root.join(component.expand(&profile.arch));
        if paths.iter().any(|p| p.dir == dir) {
            return Err(ConfigError::DuplicateSearchPath {
                dir: dir.display().to_string(),
            });
        }
        paths.push(SearchPath {
            component: component.name.clone(),
            dir,
        });
    }
    Ok(paths)
}
