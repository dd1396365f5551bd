//! linkenv - cross-toolchain linker environment composer
//!
//! Before a native compiler/linker toolchain can cross-build against a
//! locally staged foreign SDK, the invoking process environment needs
//! correct, ordered, non-conflicting native-library search directives
//! pointing into that staged tree. This crate computes and installs them:
//!
//! 1. **Resolver** expands the profile's architecture-parameterized
//!    component templates under the staging root.
//! 2. **Composer** formats each resolved directory as one search
//!    directive in the target toolchain's syntax.
//! 3. **Merger** appends the new directives to the flags variable,
//!    skipping any whose directory is already present, and exports the
//!    result for inheritance by child processes.
//!
//! ```
//! use linkenv::{apply, Arch, MemoryEnv, ToolchainProfile};
//!
//! let profile = ToolchainProfile::msvc_staged("/opt/sdk", Arch::x86_64());
//! let mut env = MemoryEnv::new();
//! let report = apply(&profile, &mut env).unwrap();
//! assert_eq!(report.appended.len(), 3);
//! ```
//!
//! Downloading/extracting the SDK and invoking the toolchain are other
//! tools' jobs; this crate never reads the filesystem for resolution and
//! never verifies that the staged tree is complete.

pub mod compose;
pub mod env;
pub mod plan;
pub mod profile;
pub mod resolver;

pub use compose::{compose_flags, FlagToken};
pub use env::{apply, ApplyReport, EnvTable, MemoryEnv, MergeOutcome, ProcessEnv};
pub use plan::{plan, CompositionPlan};
pub use profile::{Arch, ConfigError, FlagStyle, LibraryComponent, ToolchainProfile};
pub use resolver::{resolve_search_paths, SearchPath};
