//! Environment-derived storage enumeration.
//!
//! Some device generations describe external storage through three
//! environment-style values: a primary external root, a separator-joined
//! list of secondary roots, and an emulated-storage target template. On
//! emulated layouts the per-user directory is the template plus the user
//! id, which is recoverable as the trailing numeric segment of the primary
//! root (`/storage/emulated/0` yields `0`).

use std::path::{Path, PathBuf};

/// The three environment values consumed by the environment tier.
///
/// [`EnvConfig::from_process_env`] reads them from the process environment;
/// constructing the struct directly lets tests and embedders supply values
/// without touching global state. Values are read once per discovery call
/// and never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    /// Primary external root (`EXTERNAL_STORAGE`).
    pub external: Option<String>,
    /// Secondary roots, separator-joined per platform convention
    /// (`SECONDARY_STORAGE`).
    pub secondary: Option<String>,
    /// Emulated-storage target template (`EMULATED_STORAGE_TARGET`).
    pub emulated_target: Option<String>,
}

impl EnvConfig {
    /// Reads the three values from the process environment.
    ///
    /// Unset and empty values are both treated as absent.
    pub fn from_process_env() -> Self {
        fn read(name: &str) -> Option<String> {
            std::env::var(name).ok().filter(|v| !v.is_empty())
        }
        Self {
            external: read("EXTERNAL_STORAGE"),
            secondary: read("SECONDARY_STORAGE"),
            emulated_target: read("EMULATED_STORAGE_TARGET"),
        }
    }

    /// Returns `true` when none of the three values is present.
    pub fn is_empty(&self) -> bool {
        self.external.is_none() && self.secondary.is_none() && self.emulated_target.is_none()
    }
}

/// Expands the environment configuration into candidate roots.
///
/// The primary entry comes first: the per-user emulated path when an
/// emulated target is configured and the primary root ends in a numeric
/// segment, otherwise the plain primary root (falling back to
/// `default_external` when unset). Secondary roots follow in declaration
/// order.
pub(crate) fn environment_candidates(env: &EnvConfig, default_external: &Path) -> Vec<PathBuf> {
    let primary: PathBuf = env
        .external
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| default_external.to_path_buf());

    let mut candidates = Vec::new();
    match env.emulated_target.as_deref() {
        Some(target) if !target.is_empty() => match trailing_numeric_segment(&primary) {
            Some(user_id) => candidates.push(Path::new(target).join(user_id)),
            None => candidates.push(primary),
        },
        _ => candidates.push(primary),
    }

    if let Some(secondary) = env.secondary.as_deref() {
        candidates.extend(
            std::env::split_paths(secondary).filter(|p| !p.as_os_str().is_empty()),
        );
    }

    candidates
}

/// Returns the final path segment when it consists solely of ASCII digits.
fn trailing_numeric_segment(path: &Path) -> Option<&str> {
    let last = path.file_name()?.to_str()?;
    (!last.is_empty() && last.bytes().all(|b| b.is_ascii_digit())).then_some(last)
}
