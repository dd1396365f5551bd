//! Toolchain profile: the configuration record for one composition
//!
//! A profile names everything the composer needs for a single
//! (compiler family, target OS, architecture) tuple: the staging root the
//! SDK was extracted into, the target architecture, the ordered library
//! components, and the flag syntax of the downstream toolchain.

mod defaults;
mod load;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use defaults::{ARCH_VAR, DEFAULT_ARCH, DEFAULT_FLAGS_VAR, DEFAULT_SEPARATOR, ROOT_VAR};

/// Target CPU architecture identifier
///
/// Selects the per-architecture subtree of each library component
/// (e.g. `sdk/lib/um/x86_64`). Any non-empty identifier is accepted;
/// constructors exist for the common targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arch(String);

impl Arch {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn x86_64() -> Self {
        Self::new("x86_64")
    }

    pub fn aarch64() -> Self {
        Self::new("aarch64")
    }

    pub fn x86() -> Self {
        Self::new("x86")
    }

    pub fn arm() -> Self {
        Self::new("arm")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Arch {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A named, architecture-parameterized subtree of the staged SDK
///
/// The template is a relative path in which `{arch}` is replaced by the
/// profile's architecture identifier (e.g. `"sdk/lib/ucrt/{arch}"`).
/// Declaration order is search order: first declared wins at link time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryComponent {
    /// Component name (e.g. "crt", "ucrt", "um")
    pub name: String,

    /// Relative path template, parameterized by `{arch}`
    pub template: String,
}

impl LibraryComponent {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
        }
    }

    /// Expand the template for a concrete architecture
    ///
    /// A template without an `{arch}` placeholder is valid and denotes an
    /// architecture-independent subtree.
    pub fn expand(&self, arch: &Arch) -> String {
        self.template.replace("{arch}", arch.as_str())
    }
}

/// Search-directive syntax of the downstream toolchain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagStyle {
    /// `-Lnative={path}` (rustc, the default)
    #[default]
    RustcNative,

    /// `-L{path}` (GNU-style driver)
    Gnu,

    /// `/LIBPATH:{path}` (MSVC link.exe)
    Msvc,
}

impl FlagStyle {
    /// Format one search directive embedding `dir` verbatim
    pub fn format(&self, dir: &Path) -> String {
        match self {
            FlagStyle::RustcNative => format!("-Lnative={}", dir.display()),
            FlagStyle::Gnu => format!("-L{}", dir.display()),
            FlagStyle::Msvc => format!("/LIBPATH:{}", dir.display()),
        }
    }

    /// Directive prefixes of every known style, longest first
    ///
    /// Order matters: `-Lnative=` must be tried before `-L` when stripping
    /// a prefix from an existing token.
    pub fn known_prefixes() -> [&'static str; 3] {
        ["-Lnative=", "/LIBPATH:", "-L"]
    }
}

/// Configuration errors
///
/// Every variant names the offending input; detection happens before any
/// composition so that failure surfaces at configuration time, not as a
/// "library not found" error from the downstream linker minutes later.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("staging root is not set")]
    MissingRoot,

    #[error("staging root must be an absolute path: {root}")]
    RelativeRoot { root: String },

    #[error("target architecture is not set")]
    MissingArch,

    #[error("library component list is empty")]
    NoComponents,

    #[error("library component has an empty name")]
    UnnamedComponent,

    #[error("duplicate library component: {name}")]
    DuplicateComponent { name: String },

    #[error("library component {name} has an empty path template")]
    EmptyTemplate { name: String },

    #[error("library component {name} has an absolute path template: {template}")]
    AbsoluteTemplate { name: String, template: String },

    #[error("components resolve to the same directory: {dir}")]
    DuplicateSearchPath { dir: String },

    #[error("flags variable name is empty")]
    MissingFlagsVar,

    #[error("flag separator is empty")]
    EmptySeparator,

    #[error("IO error: {0}")]
    Io(String),

    #[error("TOML parse error: {0}")]
    Parse(String),
}

/// Configuration record for one composition
///
/// Fixed per toolchain target, declared once, consumed by the
/// resolver/composer/merger pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainProfile {
    /// Absolute path to the staged foreign-SDK tree (read-only to this crate)
    pub root: PathBuf,

    /// Target architecture identifier
    pub arch: Arch,

    /// Ordered library components; first declared = highest search priority
    pub components: Vec<LibraryComponent>,

    /// Search-directive syntax of the downstream toolchain
    pub flag_style: FlagStyle,

    /// Token separator in the flags variable
    pub separator: String,

    /// Name of the environment variable receiving the composed flags
    pub flags_var: String,
}

impl ToolchainProfile {
    /// Create a profile with an empty component list
    ///
    /// Components are added with [`with_component`](Self::with_component);
    /// an empty list fails validation.
    pub fn new(root: impl Into<PathBuf>, arch: Arch) -> Self {
        Self {
            root: root.into(),
            arch,
            components: Vec::new(),
            flag_style: FlagStyle::default(),
            separator: DEFAULT_SEPARATOR.to_string(),
            flags_var: DEFAULT_FLAGS_VAR.to_string(),
        }
    }

    /// Create a profile for the builtin MSVC-family staged SDK layout
    ///
    /// Components, in search order: C runtime, universal C runtime,
    /// platform SDK user-mode libraries.
    pub fn msvc_staged(root: impl Into<PathBuf>, arch: Arch) -> Self {
        Self {
            components: defaults::msvc_components(),
            ..Self::new(root, arch)
        }
    }

    /// Append a library component (declaration order is search order)
    pub fn with_component(
        mut self,
        name: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.components.push(LibraryComponent::new(name, template));
        self
    }

    pub fn with_flag_style(mut self, style: FlagStyle) -> Self {
        self.flag_style = style;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_flags_var(mut self, name: impl Into<String>) -> Self {
        self.flags_var = name.into();
        self
    }

    /// Validate all inputs, reporting the first violation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root.as_os_str().is_empty() {
            return Err(ConfigError::MissingRoot);
        }
        if !self.root.is_absolute() {
            return Err(ConfigError::RelativeRoot {
                root: self.root.display().to_string(),
            });
        }
        if self.arch.as_str().trim().is_empty() {
            return Err(ConfigError::MissingArch);
        }
        if self.components.is_empty() {
            return Err(ConfigError::NoComponents);
        }
        for (i, component) in self.components.iter().enumerate() {
            if component.name.trim().is_empty() {
                return Err(ConfigError::UnnamedComponent);
            }
            if self.components[..i].iter().any(|c| c.name == component.name) {
                return Err(ConfigError::DuplicateComponent {
                    name: component.name.clone(),
                });
            }
            if component.template.trim().is_empty() {
                return Err(ConfigError::EmptyTemplate {
                    name: component.name.clone(),
                });
            }
            if Path::new(&component.template).is_absolute() {
                return Err(ConfigError::AbsoluteTemplate {
                    name: component.name.clone(),
                    template: component.template.clone(),
                });
            }
        }
        if self.flags_var.trim().is_empty() {
            return Err(ConfigError::MissingFlagsVar);
        }
        if self.separator.is_empty() {
            return Err(ConfigError::EmptySeparator);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_profile() -> ToolchainProfile {
        ToolchainProfile::msvc_staged("/opt/sdk", Arch::x86_64())
    }

    #[test]
    fn test_expand_template() {
        let component = LibraryComponent::new("um", "sdk/lib/um/{arch}");
        assert_eq!(component.expand(&Arch::x86_64()), "sdk/lib/um/x86_64");
        assert_eq!(component.expand(&Arch::aarch64()), "sdk/lib/um/aarch64");
    }

    #[test]
    fn test_expand_without_placeholder() {
        let component = LibraryComponent::new("shared", "sdk/lib/shared");
        assert_eq!(component.expand(&Arch::x86_64()), "sdk/lib/shared");
    }

    #[test]
    fn test_flag_style_format() {
        let dir = Path::new("/opt/sdk/crt/lib/x86_64");
        assert_eq!(
            FlagStyle::RustcNative.format(dir),
            "-Lnative=/opt/sdk/crt/lib/x86_64"
        );
        assert_eq!(FlagStyle::Gnu.format(dir), "-L/opt/sdk/crt/lib/x86_64");
        assert_eq!(
            FlagStyle::Msvc.format(dir),
            "/LIBPATH:/opt/sdk/crt/lib/x86_64"
        );
    }

    #[test]
    fn test_msvc_staged_component_order() {
        let profile = valid_profile();
        let names: Vec<&str> = profile.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["crt", "ucrt", "um"]);
    }

    #[test]
    fn test_valid_profile_passes() {
        valid_profile().validate().unwrap();
    }

    #[test]
    fn test_empty_root_rejected() {
        let profile = ToolchainProfile::msvc_staged("", Arch::x86_64());
        assert!(matches!(profile.validate(), Err(ConfigError::MissingRoot)));
    }

    #[test]
    fn test_relative_root_rejected() {
        let profile = ToolchainProfile::msvc_staged("opt/sdk", Arch::x86_64());
        assert!(matches!(
            profile.validate(),
            Err(ConfigError::RelativeRoot { .. })
        ));
    }

    #[test]
    fn test_empty_arch_rejected() {
        let profile = ToolchainProfile::msvc_staged("/opt/sdk", Arch::new(""));
        assert!(matches!(profile.validate(), Err(ConfigError::MissingArch)));
    }

    #[test]
    fn test_empty_component_list_rejected() {
        let profile = ToolchainProfile::new("/opt/sdk", Arch::x86_64());
        assert!(matches!(profile.validate(), Err(ConfigError::NoComponents)));
    }

    #[test]
    fn test_duplicate_component_rejected() {
        let profile = ToolchainProfile::new("/opt/sdk", Arch::x86_64())
            .with_component("crt", "crt/lib/{arch}")
            .with_component("crt", "other/{arch}");
        match profile.validate() {
            Err(ConfigError::DuplicateComponent { name }) => assert_eq!(name, "crt"),
            other => panic!("expected DuplicateComponent, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_template_rejected() {
        let profile = ToolchainProfile::new("/opt/sdk", Arch::x86_64())
            .with_component("crt", "");
        match profile.validate() {
            Err(ConfigError::EmptyTemplate { name }) => assert_eq!(name, "crt"),
            other => panic!("expected EmptyTemplate, got {:?}", other),
        }
    }

    #[test]
    fn test_unnamed_component_rejected() {
        let profile = ToolchainProfile::new("/opt/sdk", Arch::x86_64())
            .with_component("", "crt/lib/{arch}");
        assert!(matches!(
            profile.validate(),
            Err(ConfigError::UnnamedComponent)
        ));
    }

    #[test]
    fn test_absolute_template_rejected() {
        let profile = ToolchainProfile::new("/opt/sdk", Arch::x86_64())
            .with_component("crt", "/crt/lib/{arch}");
        assert!(matches!(
            profile.validate(),
            Err(ConfigError::AbsoluteTemplate { .. })
        ));
    }

    #[test]
    fn test_empty_separator_rejected() {
        let profile = valid_profile().with_separator("");
        assert!(matches!(
            profile.validate(),
            Err(ConfigError::EmptySeparator)
        ));
    }

    #[test]
    fn test_empty_flags_var_rejected() {
        let profile = valid_profile().with_flags_var("");
        assert!(matches!(
            profile.validate(),
            Err(ConfigError::MissingFlagsVar)
        ));
    }

    #[test]
    fn test_profile_serialization() {
        let profile = valid_profile();
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains(r#""arch":"x86_64""#));
        assert!(json.contains(r#""flag_style":"rustc_native""#));

        let parsed: ToolchainProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, profile);
    }
}
