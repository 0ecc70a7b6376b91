use std::path::{Path, PathBuf};

use tracing::warn;

use crate::resolve::path::canonicalize_lenient;

/// Result of checking a canonical path against the blacklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access<'a> {
    Allowed,
    /// Denied by the first matching blacklist entry.
    Denied(&'a Path),
}

impl Access<'_> {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allowed)
    }
}

/// Denies any path lying under a blacklisted prefix.
///
/// Prefix matching is component-wise: `/srv/a/b` blocks `/srv/a/b` and
/// `/srv/a/b/c` but not `/srv/a/bc`. Entries are checked in configured
/// order and the first match wins.
#[derive(Debug, Clone, Default)]
pub struct AccessGuard {
    blacklist: Vec<PathBuf>,
}

impl AccessGuard {
    /// Builds a guard from entries that are already canonical.
    pub fn new(blacklist: Vec<PathBuf>) -> Self {
        Self { blacklist }
    }

    pub fn check(&self, canonical: &Path) -> Access<'_> {
        self.blacklist
            .iter()
            .find(|prefix| canonical.starts_with(prefix))
            .map_or(Access::Allowed, |prefix| Access::Denied(prefix.as_path()))
    }

    pub fn is_allowed(&self, canonical: &Path) -> bool {
        self.check(canonical).is_allowed()
    }
}

/// Turns configured blacklist entries into canonical absolute prefixes.
///
/// Relative entries are taken relative to `root`; absolute entries are used
/// as given. Entries need not exist. Blank entries are skipped since they
/// would resolve to the root itself.
pub fn resolve_entries<S: AsRef<str>>(root: &Path, entries: &[S]) -> Vec<PathBuf> {
    entries
        .iter()
        .filter_map(|entry| {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                warn!("Ignoring empty blacklist entry");
                return None;
            }

            let candidate = Path::new(entry);
            let absolute = if candidate.is_absolute() {
                candidate.to_path_buf()
            } else {
                root.join(candidate)
            };
            Some(canonicalize_lenient(&absolute))
        })
        .collect()
}
