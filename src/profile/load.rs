//! Profile loading
//!
//! Builds a [`ToolchainProfile`] from up to three layers, later layers
//! overriding earlier ones:
//! 1. Builtin defaults (MSVC-family component layout, `RUSTFLAGS`, space)
//! 2. TOML profile file
//! 3. Process environment (`LINKENV_ROOT`, `LINKENV_ARCH`)
//!
//! The staging root has no builtin default and must come from the file or
//! the environment.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::defaults;
use super::{Arch, ConfigError, FlagStyle, LibraryComponent, ToolchainProfile};
use crate::env::EnvTable;

/// Profile file schema; every field optional, component list replaces
/// the builtin list entirely when present (no per-entry merging)
#[derive(Debug, Default, Deserialize)]
struct ProfileFile {
    root: Option<PathBuf>,
    arch: Option<String>,
    flags_var: Option<String>,
    separator: Option<String>,
    flag_style: Option<FlagStyle>,

    #[serde(default, rename = "component")]
    components: Vec<ComponentEntry>,
}

#[derive(Debug, Deserialize)]
struct ComponentEntry {
    name: String,
    template: String,
}

impl ToolchainProfile {
    /// Load a profile from an optional TOML file plus the environment
    ///
    /// `None` means no file layer: builtin defaults plus the environment.
    /// A supplied path must exist; a typo'd path would otherwise silently
    /// produce the default composition instead of the intended one.
    /// Reading the environment goes through [`EnvTable`] so callers can
    /// substitute a [`MemoryEnv`] in tests.
    ///
    /// [`MemoryEnv`]: crate::env::MemoryEnv
    pub fn load(file: Option<&Path>, env: &dyn EnvTable) -> Result<Self, ConfigError> {
        let mut file_layer = ProfileFile::default();
        if let Some(path) = file {
            file_layer = read_profile_file(path)?;
        }

        let root = env
            .get(defaults::ROOT_VAR)
            .map(PathBuf::from)
            .or(file_layer.root)
            .ok_or(ConfigError::MissingRoot)?;

        let arch = env
            .get(defaults::ARCH_VAR)
            .or(file_layer.arch)
            .unwrap_or_else(|| defaults::DEFAULT_ARCH.to_string());

        let components = if file_layer.components.is_empty() {
            defaults::msvc_components()
        } else {
            file_layer
                .components
                .into_iter()
                .map(|c| LibraryComponent::new(c.name, c.template))
                .collect()
        };

        let profile = Self {
            root,
            arch: Arch::new(arch),
            components,
            flag_style: file_layer.flag_style.unwrap_or_default(),
            separator: file_layer
                .separator
                .unwrap_or_else(|| defaults::DEFAULT_SEPARATOR.to_string()),
            flags_var: file_layer
                .flags_var
                .unwrap_or_else(|| defaults::DEFAULT_FLAGS_VAR.to_string()),
        };

        profile.validate()?;
        Ok(profile)
    }
}

fn read_profile_file(path: &Path) -> Result<ProfileFile, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
    toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
}
