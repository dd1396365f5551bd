//! Builtin profile defaults
//!
//! The layout matches what the SDK staging tool extracts: a C-runtime tree
//! and a platform-SDK tree, each with per-architecture lib subtrees.

use super::LibraryComponent;

/// Environment variable naming the staging root
pub const ROOT_VAR: &str = "LINKENV_ROOT";

/// Environment variable naming the target architecture
pub const ARCH_VAR: &str = "LINKENV_ARCH";

/// Default target architecture when the arch variable is unset
pub const DEFAULT_ARCH: &str = "x86_64";

/// Default flags variable consumed by the downstream toolchain
pub const DEFAULT_FLAGS_VAR: &str = "RUSTFLAGS";

/// Default token separator
pub const DEFAULT_SEPARATOR: &str = " ";

/// Builtin MSVC-family component list, in search order
pub fn msvc_components() -> Vec<LibraryComponent> {
    vec![
        LibraryComponent::new("crt", "crt/lib/{arch}"),
        LibraryComponent::new("ucrt", "sdk/lib/ucrt/{arch}"),
        LibraryComponent::new("um", "sdk/lib/um/{arch}"),
    ]
}
