//! Flag composition
//!
//! Converts resolved search directories into search-directive tokens in
//! the configured toolchain syntax. Stateless and order-preserving; one
//! token per path, path embedded verbatim. Deduplication does not happen
//! here — only the merger sees prior environment state.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::profile::FlagStyle;
use crate::resolver::SearchPath;

/// One native-library search directive
///
/// Keeps the resolved directory alongside the formatted token so the
/// merger can deduplicate by path rather than by token text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagToken {
    /// The directory this token points at
    pub dir: PathBuf,

    /// The formatted directive (e.g. `-Lnative=/opt/sdk/crt/lib/x86_64`)
    pub token: String,
}

/// Compose one token per search path, in input order
pub fn compose_flags(paths: &[SearchPath], style: FlagStyle) -> Vec<FlagToken> {
    paths
        .iter()
        .map(|p| FlagToken {
            dir: p.dir.clone(),
            token: style.format(&p.dir),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_paths() -> Vec<SearchPath> {
        vec![
            SearchPath {
                component: "crt".to_string(),
                dir: PathBuf::from("/opt/sdk/crt/lib/x86_64"),
            },
            SearchPath {
                component: "um".to_string(),
                dir: PathBuf::from("/opt/sdk/sdk/lib/um/x86_64"),
            },
        ]
    }

    #[test]
    fn test_one_token_per_path() {
        let tokens = compose_flags(&sample_paths(), FlagStyle::RustcNative);

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].token, "-Lnative=/opt/sdk/crt/lib/x86_64");
        assert_eq!(tokens[1].token, "-Lnative=/opt/sdk/sdk/lib/um/x86_64");
    }

    #[test]
    fn test_token_embeds_path_verbatim() {
        for style in [FlagStyle::RustcNative, FlagStyle::Gnu, FlagStyle::Msvc] {
            for token in compose_flags(&sample_paths(), style) {
                assert!(
                    token.token.contains(&token.dir.display().to_string()),
                    "{} should embed {}",
                    token.token,
                    token.dir.display()
                );
            }
        }
    }

    #[test]
    fn test_order_preserved() {
        let tokens = compose_flags(&sample_paths(), FlagStyle::Msvc);

        assert_eq!(tokens[0].dir, PathBuf::from("/opt/sdk/crt/lib/x86_64"));
        assert_eq!(tokens[1].dir, PathBuf::from("/opt/sdk/sdk/lib/um/x86_64"));
    }

    #[test]
    fn test_empty_input() {
        assert!(compose_flags(&[], FlagStyle::Gnu).is_empty());
    }
}
